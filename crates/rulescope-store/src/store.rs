//! The authoritative per-session ruleset list and first-visit flag.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rulescope_core::manifest::{rule_resources, RuleResource};

use crate::session::SessionStorage;

/// Storage key for the serialized ruleset entry list.
const RULESETS_KEY: &str = "rulesetFilePaths";
/// Storage key for the first-visit flag.
const FIRST_VISIT_KEY: &str = "isFirstVisit";

/// One ruleset tracked by the store, derived from a manifest descriptor.
///
/// Serialized field names match the original persisted layout, so a snapshot
/// written by one session is readable by any later build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetEntry {
    /// Final path segment of `file_path`. Derived, never set independently;
    /// the store's matching key for toggles.
    #[serde(rename = "rulesetFileName")]
    pub file_name: String,
    /// Full rule-file path as given in the manifest.
    #[serde(rename = "rulesetFilePath")]
    pub file_path: String,
    /// Opaque identifier copied from the descriptor. Display only.
    #[serde(rename = "rulesetId")]
    pub id: Value,
    /// Whether the ruleset is currently enabled.
    #[serde(rename = "isEnabled")]
    pub enabled: bool,
}

impl RulesetEntry {
    fn from_resource(resource: RuleResource) -> Self {
        let file_name = resource
            .path
            .rsplit('/')
            .next()
            .unwrap_or(&resource.path)
            .to_owned();
        Self {
            file_name,
            file_path: resource.path,
            id: resource.id,
            enabled: resource.enabled,
        }
    }
}

/// Whether an import adds to or replaces the current ruleset list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Keep existing entries; importing the same manifest twice duplicates them.
    Append,
    /// Clear existing entries first, then import.
    Replace,
}

/// Session-scoped ruleset state: the entry list plus the first-visit flag.
///
/// Constructed over an injected [`SessionStorage`], rehydrating from it and
/// writing back after every mutation. Storage faults are absorbed here: a
/// failed load yields the default empty state, a failed save is logged and
/// ignored, and no operation on the store itself ever fails because of one.
pub struct RulesetStore {
    entries: Vec<RulesetEntry>,
    first_visit: bool,
    storage: Box<dyn SessionStorage>,
}

impl RulesetStore {
    /// Build a store over `storage`, restoring any persisted session state.
    #[must_use]
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        let mut store = Self {
            entries: Vec::new(),
            first_visit: true,
            storage,
        };
        store.rehydrate();
        store
    }

    fn rehydrate(&mut self) {
        match self.storage.load(RULESETS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => self.entries = entries,
                Err(err) => debug!("discarding persisted ruleset list: {err}"),
            },
            Ok(None) => {}
            Err(err) => debug!("session storage unavailable: {err}"),
        }
        match self.storage.load(FIRST_VISIT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(flag) => self.first_visit = flag,
                Err(err) => debug!("discarding persisted first-visit flag: {err}"),
            },
            Ok(None) => {}
            Err(err) => debug!("session storage unavailable: {err}"),
        }
    }

    fn persist(&mut self) {
        let entries = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(err) => {
                warn!("could not encode ruleset list: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.store(RULESETS_KEY, &entries) {
            warn!("could not persist ruleset list: {err}");
        }
        let flag = if self.first_visit { "true" } else { "false" };
        if let Err(err) = self.storage.store(FIRST_VISIT_KEY, flag) {
            warn!("could not persist first-visit flag: {err}");
        }
    }

    /// The current ruleset entries, in manifest order.
    #[must_use]
    pub fn rulesets(&self) -> &[RulesetEntry] {
        &self.entries
    }

    /// Whether this session has seen the store created without prior state.
    #[must_use]
    pub fn is_first_visit(&self) -> bool {
        self.first_visit
    }

    /// Overwrite the first-visit flag.
    pub fn set_first_visit(&mut self, value: bool) {
        self.first_visit = value;
        self.persist();
    }

    /// Empty the ruleset list. Idempotent.
    pub fn clear_rulesets(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Import every ruleset descriptor from `manifest`, in manifest order.
    ///
    /// A manifest without `declarative_net_request.rule_resources` is a no-op
    /// in both modes: existing entries stay untouched and nothing is cleared.
    /// Descriptors that do not deserialize as a ruleset resource are skipped
    /// with a warning; the rest import in order.
    pub fn import_rulesets(&mut self, manifest: &Value, mode: ImportMode) {
        let Some(resources) = rule_resources(manifest) else {
            debug!("manifest declares no rule_resources, nothing to import");
            return;
        };
        if mode == ImportMode::Replace {
            self.entries.clear();
        }
        for raw in resources {
            match serde_json::from_value::<RuleResource>(raw.clone()) {
                Ok(resource) => self.entries.push(RulesetEntry::from_resource(resource)),
                Err(err) => warn!("skipping malformed ruleset descriptor: {err}"),
            }
        }
        self.persist();
    }

    /// Flip the enabled flag of the first entry whose file name matches.
    ///
    /// Entries sharing a file name are indistinguishable here; the first
    /// match wins. Returns whether a match was found; an unknown name is a
    /// no-op, not an error.
    pub fn toggle_ruleset(&mut self, file_name: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.file_name == file_name) else {
            return false;
        };
        entry.enabled = !entry.enabled;
        self.persist();
        true
    }
}
