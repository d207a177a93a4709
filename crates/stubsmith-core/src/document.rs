use std::collections::BTreeSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::mode::{InvalidFlag, StubMode};

/// Batch of fields to generate fixture values for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FixtureDocument {
    /// Language/region tag for locale-aware generators (default `en`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Fields in output order.
    pub fields: Vec<FieldSpec>,
}

/// A single field: its descriptor plus generation options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// Key the value is reported under; also the field-name hint.
    pub key: String,
    /// Descriptor kind (`parameter`, `header` or `schema`).
    pub kind: String,
    /// Required-ness for schema descriptors, which never declare their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Constraint dimensions to violate; empty generates a valid value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mode: Vec<InvalidFlag>,
    /// The raw descriptor object.
    pub descriptor: Value,
}

impl FieldSpec {
    pub fn stub_mode(&self) -> StubMode {
        self.mode.iter().copied().collect()
    }
}

/// Recognized descriptor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    Parameter,
    Header,
    Schema,
}

impl DescriptorKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "parameter" | "param" => Some(Self::Parameter),
            "header" => Some(Self::Header),
            "schema" => Some(Self::Schema),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Header => "header",
            Self::Schema => "schema",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FixtureDocument {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: FixtureDocument = serde_json::from_str(text)?;
        document.check_keys()?;
        Ok(document)
    }

    /// Field keys must be unique so results can be reported by key.
    pub fn check_keys(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.key.trim().is_empty() {
                return Err(Error::InvalidDocument("field key must not be empty".to_string()));
            }
            if !seen.insert(field.key.as_str()) {
                return Err(Error::InvalidDocument(format!(
                    "duplicate field key: {}",
                    field.key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_keys() {
        let text = r#"{"fields": [
            {"key": "a", "kind": "header", "descriptor": {}},
            {"key": "a", "kind": "header", "descriptor": {}}
        ]}"#;
        let err = FixtureDocument::from_json(text).expect_err("duplicate keys");
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn parses_mode_flags() {
        let text = r#"{"fields": [
            {"key": "a", "kind": "schema", "mode": ["max-length", "pattern"], "descriptor": {}}
        ]}"#;
        let document = FixtureDocument::from_json(text).expect("parse document");
        let mode = document.fields[0].stub_mode();
        assert_eq!(mode, StubMode::MAX_LENGTH | StubMode::PATTERN);
    }
}
