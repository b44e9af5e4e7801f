//! Structural validation of an extension manifest against the required-field schema.

use serde_json::Value;

/// Expected shape of a required manifest field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldShape {
    String,
    Number,
    Array,
}

/// The fixed, ordered required-field schema. Report lists follow this order.
const REQUIRED_FIELDS: [(&str, FieldShape); 4] = [
    ("name", FieldShape::String),
    ("version", FieldShape::String),
    ("manifest_version", FieldShape::Number),
    ("permissions", FieldShape::Array),
];

/// Category of a structural fault found in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// A required top-level key is absent.
    MissingField,
    /// A required key is present with the wrong primitive/array shape.
    InvalidValueType,
}

/// Every structural fault found in a manifest, grouped by category.
///
/// Field names appear in schema order. A field is listed under at most one
/// category: presence is checked first, shape only when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxReport {
    /// Required fields absent from the manifest.
    pub missing_fields: Vec<&'static str>,
    /// Required fields present with the wrong shape.
    pub invalid_value_types: Vec<&'static str>,
}

impl SyntaxReport {
    /// The set of fault categories present in this report, in check order.
    #[must_use]
    pub fn kinds(&self) -> Vec<FaultKind> {
        let mut kinds = Vec::new();
        if !self.missing_fields.is_empty() {
            kinds.push(FaultKind::MissingField);
        }
        if !self.invalid_value_types.is_empty() {
            kinds.push(FaultKind::InvalidValueType);
        }
        kinds
    }

    /// True when any field is missing or mis-typed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.missing_fields.is_empty() || !self.invalid_value_types.is_empty()
    }
}

/// Outcome of validating a manifest.
///
/// A tagged result rather than a bare boolean-or-report, so callers branch on
/// the variant instead of truthiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestCheck {
    /// All required fields are present with the expected shapes.
    Valid,
    /// At least one required field is missing or mis-typed.
    Invalid(SyntaxReport),
}

impl ManifestCheck {
    /// True for the [`ManifestCheck::Valid`] variant.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Check a parsed manifest against the required-field schema.
///
/// Enumerates every failing field rather than stopping at the first. Extra
/// fields are ignored. A non-object `manifest` (null, array, primitive) owns
/// none of the required keys and reports all of them missing. Never panics.
#[must_use]
pub fn validate_manifest(manifest: &Value) -> ManifestCheck {
    let mut report = SyntaxReport::default();

    for (field, shape) in REQUIRED_FIELDS {
        match manifest.get(field) {
            None => report.missing_fields.push(field),
            Some(value) => {
                let ok = match shape {
                    FieldShape::String => value.is_string(),
                    FieldShape::Number => value.is_number(),
                    FieldShape::Array => value.is_array(),
                };
                if !ok {
                    report.invalid_value_types.push(field);
                }
            }
        }
    }

    if report.is_error() {
        ManifestCheck::Invalid(report)
    } else {
        ManifestCheck::Valid
    }
}
