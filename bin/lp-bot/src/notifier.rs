use async_trait::async_trait;
use lp_tracker_core::{ChannelRef, Error, Notification, Notifier};
use poise::serenity_prelude::{ChannelId, CreateAttachment, CreateEmbed, CreateMessage, Http};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Posts notifications as embeds, with the tier emblem as thumbnail when
/// `<rank_images>/<tier>.png` exists.
pub struct DiscordNotifier {
    http: Arc<Http>,
    rank_images: PathBuf,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>, rank_images: PathBuf) -> Self {
        Self { http, rank_images }
    }
}

/// Emblem for `key`, or `None` when it cannot be read. The notification is
/// sent without a thumbnail in that case.
async fn rank_image(rank_images: &Path, key: &str) -> Option<CreateAttachment> {
    let path = image_path(rank_images, key);
    match CreateAttachment::path(&path).await {
        Ok(attachment) => Some(attachment),
        Err(e) => {
            warn!("Rank image {path:?} not available: {e}");
            None
        }
    }
}

fn image_path(rank_images: &Path, key: &str) -> PathBuf {
    rank_images.join(format!("{key}.png"))
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn deliver(
        &self,
        channel: ChannelRef,
        notification: &Notification,
    ) -> Result<(), Error> {
        let mut embed = CreateEmbed::new()
            .title(&notification.title)
            .description(&notification.body)
            .colour(notification.colour.0);
        let mut message = CreateMessage::new();

        let attachment = match &notification.image_key {
            Some(key) => rank_image(&self.rank_images, key).await,
            None => None,
        };
        if let Some(attachment) = attachment {
            embed = embed.thumbnail(format!("attachment://{}", attachment.filename));
            message = message.add_file(attachment);
        }

        debug!("Sending {:?} to channel {channel:?}", notification.title);
        ChannelId::from(channel.0)
            .send_message(&self.http, message.embed(embed))
            .await
            .map_err(|e| Error::Delivery(e.to_string()))?;
        Ok(())
    }
}
