use async_trait::async_trait;
use lp_tracker_core::{ChannelRef, Persist, TrackerState, TrackingStore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub use error::StorageError;

pub mod error;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ChannelConfig {
    channel_id: Option<ChannelRef>,
}

/// Keeps the tracked entities and the notification channel in two JSON
/// files. Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    data_file: PathBuf,
    channel_file: PathBuf,
}

impl JsonStorage {
    pub fn new(data_file: impl Into<PathBuf>, channel_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            channel_file: channel_file.into(),
        }
    }

    /// Load both files. Missing, empty or malformed files load as empty.
    pub async fn load(&self) -> TrackerState {
        let store: TrackingStore = load_or_default(&self.data_file).await;
        let channel: ChannelConfig = load_or_default(&self.channel_file).await;
        debug!(
            "Loaded {} tracked entities, channel {:?}",
            store.len(),
            channel.channel_id
        );
        TrackerState {
            store,
            channel: channel.channel_id,
        }
    }

    pub async fn write_store(&self, store: &TrackingStore) -> Result<(), StorageError> {
        write_json(&self.data_file, store).await
    }

    pub async fn write_channel(&self, channel: Option<ChannelRef>) -> Result<(), StorageError> {
        write_json(&self.channel_file, &ChannelConfig { channel_id: channel }).await
    }
}

#[async_trait]
impl Persist for JsonStorage {
    async fn save_store(&self, store: &TrackingStore) -> Result<(), lp_tracker_core::Error> {
        Ok(self.write_store(store).await?)
    }

    async fn save_channel(
        &self,
        channel: Option<ChannelRef>,
    ) -> Result<(), lp_tracker_core::Error> {
        Ok(self.write_channel(channel).await?)
    }
}

async fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!("Failed to read {path:?}, starting empty: {e:?}");
            return T::default();
        }
    };
    if contents.trim().is_empty() {
        return T::default();
    }
    serde_json::from_str(&contents).unwrap_or_else(|e| {
        warn!("Malformed {path:?}, starting empty: {e}");
        T::default()
    })
}

/// Writes through a sibling `.tmp` file which is then renamed over `path`.
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let contents = serde_json::to_string_pretty(value)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    tokio::fs::write(&tmp, contents).await.map_err(io_error)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_error)?;
    debug!("Wrote {path:?}");
    Ok(())
}
