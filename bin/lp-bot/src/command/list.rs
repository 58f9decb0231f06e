use crate::command::{CommandError, Data};

/// Display the summoners being tracked and their last known rank
#[poise::command(slash_command, ephemeral)]
pub async fn list(ctx: poise::Context<'_, Data, CommandError>) -> Result<(), CommandError> {
    let tracked = ctx.data().tracker.tracked().await;
    if tracked.is_empty() {
        ctx.reply("No tracked summoners.").await?;
        return Ok(());
    }

    let mut message = String::from("**TRACKED SUMMONERS**\n**-------------------------**\n");
    for (index, entity) in tracked.iter().enumerate() {
        let rank = match (&entity.last_rank, &entity.last_checked) {
            (Some(rank), Some(checked)) => {
                format!("{rank} (as of {})", checked.format("%Y-%m-%d %H:%M UTC"))
            }
            (Some(rank), None) => rank.to_string(),
            _ => "no data yet".to_string(),
        };
        message += &format!("**{})** {} - {}\n", index + 1, entity.riot_id(), rank);
    }

    ctx.reply(message).await?;
    Ok(())
}
