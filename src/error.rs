//! Error types for the meta-schema linter
//!
//! Shape problems in a schema document are never errors; they are reported as
//! [`Diagnostic`](crate::diagnostic::Diagnostic)s. The variants here cover caller
//! misuse and the loading collaborators around the core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for linter operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Linter errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The caller handed over something that has no JSON representation
    #[error("Input is not a JSON value: {0}")]
    InvalidInput(String),

    #[error("Schema file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
