//! Session ruleset commands — `import`, `list`, `toggle`, `reset`.

use std::path::Path;

use anyhow::{bail, Result};

use rulescope_core::validate::{validate_manifest, ManifestCheck};
use rulescope_store::session::{default_session_path, FileStorage};
use rulescope_store::store::{ImportMode, RulesetStore};

use crate::commands::check::{print_report, read_manifest};

fn open_store() -> RulesetStore {
    RulesetStore::new(Box::new(FileStorage::new(default_session_path())))
}

/// Run `rulescope import` — validate the manifest at `path`, then import its
/// ruleset descriptors into the session store.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or fails
/// validation.
pub fn run_import(path: &Path, replace: bool) -> Result<()> {
    let manifest = read_manifest(path)?;
    if let ManifestCheck::Invalid(report) = validate_manifest(&manifest) {
        print_report(&report);
        bail!("refusing to import an invalid manifest");
    }

    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Append
    };
    let mut store = open_store();
    store.import_rulesets(&manifest, mode);
    println!("tracking {} ruleset(s)", store.rulesets().len());
    Ok(())
}

/// Run `rulescope list` — print every tracked ruleset.
///
/// # Errors
///
/// Infallible in practice; kept as `Result` for uniform dispatch.
pub fn run_list() -> Result<()> {
    let mut store = open_store();
    if store.is_first_visit() {
        println!("first visit: import a manifest with `rulescope import <manifest.json>`");
        store.set_first_visit(false);
    }
    if store.rulesets().is_empty() {
        println!("no rulesets tracked");
        return Ok(());
    }
    for entry in store.rulesets() {
        let mark = if entry.enabled { "x" } else { " " };
        println!(
            "[{mark}] {}  {}  (id {})",
            entry.file_name, entry.file_path, entry.id
        );
    }
    Ok(())
}

/// Run `rulescope toggle` — flip one ruleset's enabled flag by file name.
///
/// An unknown file name is reported but is not a failure.
///
/// # Errors
///
/// Infallible in practice; kept as `Result` for uniform dispatch.
pub fn run_toggle(file_name: &str) -> Result<()> {
    let mut store = open_store();
    if store.toggle_ruleset(file_name) {
        if let Some(entry) = store.rulesets().iter().find(|e| e.file_name == file_name) {
            let state = if entry.enabled { "enabled" } else { "disabled" };
            println!("{file_name} is now {state}");
        }
    } else {
        println!("no such ruleset: {file_name}");
    }
    Ok(())
}

/// Run `rulescope reset` — clear the tracked ruleset list.
///
/// # Errors
///
/// Infallible in practice; kept as `Result` for uniform dispatch.
pub fn run_reset() -> Result<()> {
    let mut store = open_store();
    store.clear_rulesets();
    println!("cleared tracked rulesets");
    Ok(())
}
