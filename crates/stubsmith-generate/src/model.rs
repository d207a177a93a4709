use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use stubsmith_core::{InvalidFlag, StubMode};

/// Options for document generation.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Flags added to every field's own mode.
    pub mode: StubMode,
    /// Serialize list values of parameters and headers per their
    /// `collectionFormat`.
    pub join_collections: bool,
}

/// Structured issue for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub key: String,
    pub code: String,
    pub message: String,
    /// Requested violations that could not be honored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unhonored: Vec<InvalidFlag>,
}

/// Result of generating a whole fixture document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureReport {
    pub run_id: String,
    pub locale: String,
    pub values: BTreeMap<String, Value>,
    pub generator_usage: BTreeMap<String, u64>,
    pub issues_by_code: BTreeMap<String, u64>,
    pub issues: Vec<FieldIssue>,
    pub duration_ms: u64,
}

impl FixtureReport {
    pub fn new(run_id: String, locale: String) -> Self {
        Self {
            run_id,
            locale,
            values: BTreeMap::new(),
            generator_usage: BTreeMap::new(),
            issues_by_code: BTreeMap::new(),
            issues: Vec::new(),
            duration_ms: 0,
        }
    }

    /// True when every field produced a value without issues.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn record_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn record_generator_usage(&mut self, id: &str) {
        *self.generator_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_issue(&mut self, issue: FieldIssue) {
        *self.issues_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        self.issues.push(issue);
    }
}
