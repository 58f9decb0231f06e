use crate::error::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Destination that notifications are posted to. Only one is active at a
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelRef(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour(pub u32);

impl Colour {
    pub const FIRST_RECORD: Colour = Colour(0x3498DB);
    pub const GAIN: Colour = Colour(0x2ECC71);
    pub const LOSS: Colour = Colour(0xE74C3C);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub colour: Colour,
    /// Name of the image to attach, if one is available.
    pub image_key: Option<String>,
}

/// Messaging collaborator. Implementations should still deliver the
/// notification when the image named by [`Notification::image_key`] is
/// missing.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, channel: ChannelRef, notification: &Notification)
        -> Result<(), Error>;
}
