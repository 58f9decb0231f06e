use crate::command::BotTracker;
use async_trait::async_trait;
use lp_tracker_core::ChannelRef;
use poise::serenity_prelude::{Context, EventHandler, GuildChannel, Message, Ready};
use std::sync::Arc;
use tracing::{error, info};

pub struct BotHandler {
    pub tracker: Arc<BotTracker>,
}

#[async_trait]
impl EventHandler for BotHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} has connected", ready.user.name);
    }

    async fn channel_delete(
        &self,
        _ctx: Context,
        channel: GuildChannel,
        _messages: Option<Vec<Message>>,
    ) {
        match self
            .tracker
            .unset_channel_if(ChannelRef(channel.id.get()))
            .await
        {
            Ok(true) => info!("Notification channel {} was deleted", channel.name),
            Ok(false) => {}
            Err(e) => error!("Failed to unset deleted channel {:?}: {e:?}", channel.id),
        }
    }
}
