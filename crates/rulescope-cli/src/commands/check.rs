//! `rulescope check` — validate an extension manifest's required fields.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use rulescope_core::validate::{validate_manifest, ManifestCheck, SyntaxReport};

/// Read and parse a manifest file into an untyped JSON value.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn read_manifest(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Print each fault category of a validation report on its own line.
pub fn print_report(report: &SyntaxReport) {
    if !report.missing_fields.is_empty() {
        println!("missing fields: {}", report.missing_fields.join(", "));
    }
    if !report.invalid_value_types.is_empty() {
        println!(
            "invalid value types: {}",
            report.invalid_value_types.join(", ")
        );
    }
}

/// Run `rulescope check` — validate the manifest at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if validation
/// finds any missing or mis-typed required field.
pub fn run_check(path: &Path) -> Result<()> {
    let manifest = read_manifest(path)?;
    match validate_manifest(&manifest) {
        ManifestCheck::Valid => {
            println!("manifest OK");
            Ok(())
        }
        ManifestCheck::Invalid(report) => {
            print_report(&report);
            bail!("{} is not a valid extension manifest", path.display());
        }
    }
}
