use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for lp_tracker_core::Error {
    fn from(value: StorageError) -> Self {
        lp_tracker_core::Error::Persistence(Box::new(value))
    }
}
