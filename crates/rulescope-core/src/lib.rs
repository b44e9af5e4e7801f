//! Core domain types for the rulescope ecosystem.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod manifest;
pub mod validate;
