//! Compile-time error type for schema loading and resolution.

use thiserror::Error;

use crate::resolve::ResolveError;

/// Anything that can stop a schema from being compiled. Fatal: generation
/// aborts and no artifact is emitted.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document is not valid JSON or names an unsupported type.
    #[error("schema parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A property's type cannot be mapped to a host type.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
