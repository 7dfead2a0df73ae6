use std::path::PathBuf;
use thiserror::Error;

use crate::core::{CompatibilityError, HashError};

/// Errors that abort a snapshot run before anything is published
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Hashing failed: {0}")]
    Hash(#[from] HashError),

    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),
}

impl SnapshotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SnapshotError::Json {
            path: path.into(),
            source,
        }
    }
}
