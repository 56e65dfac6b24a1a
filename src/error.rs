//! Error types shared across the storage and mirror layers

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the storage paths
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The graph document could not be read; callers degrade to an empty
    /// graph rather than failing startup
    #[error("graph data unavailable at {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// The mirror store rejected or never received a request
    #[error("mirror store unavailable: {0}")]
    StoreUnavailable(String),

    /// A persisted record did not match the expected shape
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Admin credentials did not match
    #[error("authentication failed")]
    AuthFailure,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the caller should degrade and continue instead of failing
    /// the whole operation
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            StoreError::DataUnavailable { .. } | StoreError::StoreUnavailable(_)
        )
    }
}
