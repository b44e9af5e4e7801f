//! Session-scoped ruleset state for the rulescope ecosystem.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod session;
pub mod store;
