use std::path::PathBuf;
use thiserror::Error;

/// Errors from the file-backed stores (facts, event log).
///
/// A missing file is never an error — stores initialize lazily on first
/// write. These variants cover the cases callers may want to react to:
/// the file exists but can't be read, or it exists but isn't valid JSON.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store at {path} holds a malformed document")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }
}
