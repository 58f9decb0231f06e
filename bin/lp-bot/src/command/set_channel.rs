use crate::command::{CommandError, Data};
use anyhow::Context;
use lp_tracker_core::ChannelRef;

/// Set the channel for LP updates to the current channel
#[poise::command(slash_command, guild_only)]
pub async fn set_channel(ctx: poise::Context<'_, Data, CommandError>) -> Result<(), CommandError> {
    let channel_id = ctx.channel_id();
    ctx.data()
        .tracker
        .set_channel(ChannelRef(channel_id.get()))
        .await?;

    let message = format!(
        "Channel set to **#{}** for LP updates.",
        ctx.guild_channel()
            .await
            .context("Trying to get guild channel")?
            .name
    );
    ctx.reply(message).await?;
    Ok(())
}
