mod logging;
mod report;

pub use logging::init_logging;
pub use report::{GeneratorListing, list_generators, write_json};

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while emitting run output.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("output error: {0}")]
    Output(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(String),
}

pub type RunResult<T> = std::result::Result<T, RunError>;
