//! Typed model for the `declarative_net_request` section of an extension manifest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One ruleset descriptor from `declarative_net_request.rule_resources`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResource {
    /// Forward-slash-separated path to the rule file, relative to the extension root.
    pub path: String,
    /// Opaque ruleset identifier. Chrome uses strings, the DNR samples in the
    /// wild also use numbers, so the raw JSON value is kept as-is.
    pub id: Value,
    /// Whether the ruleset starts enabled.
    pub enabled: bool,
}

/// Locate the raw `declarative_net_request.rule_resources` array inside an
/// untyped manifest.
///
/// Returns `None` when the key path is absent or not an array. The shape of
/// the individual descriptors is not checked here.
#[must_use]
pub fn rule_resources(manifest: &Value) -> Option<&Vec<Value>> {
    manifest
        .get("declarative_net_request")?
        .get("rule_resources")?
        .as_array()
}
