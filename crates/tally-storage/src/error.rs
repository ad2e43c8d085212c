use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored draft {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("draft version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(reason: impl std::fmt::Display) -> Self {
        Self::Corrupt {
            key: crate::draft::DRAFT_KEY.to_string(),
            reason: reason.to_string(),
        }
    }
}
