use thiserror::Error;

/// Core error type shared across stubsmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A descriptor or document could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Reading or writing a document failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The document parsed but violates its contract.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    /// The document JSON Schema could not be compiled.
    #[error("schema error: {0}")]
    Schema(String),
}

/// Convenience alias for results returned by stubsmith crates.
pub type Result<T> = std::result::Result<T, Error>;
