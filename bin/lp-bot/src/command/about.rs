use crate::command::{CommandError, Data};
use std::time::Duration;

/// Display information about the bot (version, tracked summoners, check interval)
#[poise::command(slash_command)]
pub async fn about(ctx: poise::Context<'_, Data, CommandError>) -> Result<(), CommandError> {
    let tracked = ctx.data().tracker.tracked().await.len();
    let message = about_message(env!("CARGO_PKG_VERSION"), tracked, ctx.data().poll_interval);
    ctx.reply(message).await?;
    Ok(())
}

fn about_message(version: &str, tracked: usize, poll_interval: Duration) -> String {
    let secs = poll_interval.as_secs();
    let interval = if secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else {
        format!("{secs}s")
    };
    format!("v{version}, tracking {tracked} summoners, checking LP every {interval}")
}
