use crate::error::Error;
use crate::notify::ChannelRef;
use crate::store::TrackingStore;
use async_trait::async_trait;

/// Persistence collaborator. Both saves replace the whole stored value.
#[async_trait]
pub trait Persist: Send + Sync {
    async fn save_store(&self, store: &TrackingStore) -> Result<(), Error>;
    async fn save_channel(&self, channel: Option<ChannelRef>) -> Result<(), Error>;
}
