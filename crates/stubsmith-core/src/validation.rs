use jsonschema::JSONSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;

use crate::document::{DescriptorKind, FixtureDocument};
use crate::error::{Error, Result};

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Structured validation issue with location and hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(
        severity: IssueSeverity,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            path: path.into(),
            message: message.into(),
            hint,
        }
    }
}

/// Aggregated validation report with errors and warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }
}

/// Emit the JSON Schema for fixture documents.
pub fn fixture_document_json_schema() -> RootSchema {
    schema_for!(FixtureDocument)
}

/// Validate a fixture document against the document JSON Schema.
///
/// Structural violations are reported as errors; descriptor kinds the
/// generator does not know are reported as warnings so the remaining fields
/// can still be generated.
pub fn validate_document_json(document: &Value) -> Result<ValidationReport> {
    let schema = serde_json::to_value(fixture_document_json_schema())?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| Error::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(ValidationIssue::new(
                IssueSeverity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    let fields = document
        .get("fields")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (idx, field) in fields.iter().enumerate() {
        let Some(kind) = field.get("kind").and_then(Value::as_str) else {
            continue;
        };
        if DescriptorKind::parse(kind).is_none() {
            report.push_warning(ValidationIssue::new(
                IssueSeverity::Warning,
                "unsupported_descriptor_kind",
                format!("/fields/{idx}/kind"),
                format!("descriptor kind '{kind}' is not supported"),
                Some("use parameter, header or schema".to_string()),
            ));
        }
    }

    Ok(report)
}

fn normalized_json_pointer(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}
