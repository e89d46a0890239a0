//! Error types for Flavorgraph Core

use thiserror::Error;

use crate::limits::ValidationError;

/// Result type alias using Flavorgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Flavorgraph core error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("Invalid edge strength {strength} for {source_id} - {target_id} (expected 1-4)")]
    InvalidStrength {
        source_id: String,
        target_id: String,
        strength: u8,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
