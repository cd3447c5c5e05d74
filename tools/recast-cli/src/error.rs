//! CLI Error Types
//!
//! Error handling with clear, actionable messages.

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI-specific errors with helpful messages and hints
#[derive(Debug, Error)]
pub enum CliError {
    /// The schema file does not exist at the given path
    #[error("Schema file not found: {path}\n  Hint: pass the schema path with --schema")]
    SchemaNotFound { path: String },

    /// The schema file is not a valid schema document
    #[error("Invalid schema: {path}\n  Error: {error}")]
    InvalidSchema { path: String, error: String },

    /// `--check` comparison found the output file out of date
    #[error("Generated file is out of date: {path}\n  Hint: run 'recast generate' to refresh it")]
    OutOfDate { path: String },

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a schema not found error
    pub fn schema_not_found(path: impl Into<String>) -> Self {
        Self::SchemaNotFound { path: path.into() }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(path: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            error: error.to_string(),
        }
    }
}
