//! Error types for schema generation and input loading

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaGenError>;

/// `generate` on a `serde_json::Value` never fails; these cover getting a
/// value in the first place.
#[derive(Error, Debug)]
pub enum SchemaGenError {
    /// Not JSON text, or a value with no JSON representation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON pointer {pointer:?} did not resolve in {origin}")]
    Pointer { pointer: String, origin: String },

    #[error("jq: {0}")]
    Jq(String),

    #[error("glob: {0}")]
    Glob(String),
}
