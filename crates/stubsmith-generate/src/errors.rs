use thiserror::Error;

use stubsmith_core::StubMode;

use crate::generators::GeneratedValue;

/// Errors emitted by the stubbing engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid x-datagen hint on field '{field}': {reason}")]
    Decode { field: String, reason: String },
    #[error("field '{field}' is a collection without an element descriptor")]
    MissingElementSchema { field: String },
    #[error("unsupported locale '{0}'")]
    LocaleUnsupported(String),
    #[error("unsupported descriptor: {0}")]
    UnsupportedDescriptor(String),
    #[error("no generator found for field [{field}]")]
    GeneratorNotFound { field: String },
    #[error("{generator}: argument {index} ({value}) cannot be converted to {target}")]
    ArgumentConversion {
        generator: String,
        index: usize,
        value: String,
        target: &'static str,
    },
    #[error("field '{field}': requested violations not honored: {unhonored}")]
    PartialInvalidMode {
        field: String,
        unhonored: StubMode,
        value: GeneratedValue,
    },
    #[error("invalid constraint: {0}")]
    InvalidConstraint(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] stubsmith_core::Error),
}

impl GenerationError {
    /// Stable code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "decode_error",
            Self::MissingElementSchema { .. } => "missing_element_schema",
            Self::LocaleUnsupported(_) => "locale_unsupported",
            Self::UnsupportedDescriptor(_) => "unsupported_descriptor",
            Self::GeneratorNotFound { .. } => "generator_not_found",
            Self::ArgumentConversion { .. } => "argument_conversion",
            Self::PartialInvalidMode { .. } => "partial_invalid_mode",
            Self::InvalidConstraint(_) => "invalid_constraint",
            Self::Json(_) => "json_error",
            Self::Core(_) => "core_error",
        }
    }
}
