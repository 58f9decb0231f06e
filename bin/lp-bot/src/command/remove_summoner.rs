use crate::command::{CommandError, Data};

/// Remove a summoner from the tracking list
#[poise::command(slash_command)]
pub async fn remove_summoner(
    ctx: poise::Context<'_, Data, CommandError>,
    #[description = "Summoner Name"] summoner_name: String,
) -> Result<(), CommandError> {
    let message = if ctx.data().tracker.remove(&summoner_name).await? {
        format!("**{summoner_name}** removed from the list.")
    } else {
        format!("**{summoner_name}** is not in the list.")
    };
    ctx.reply(message).await?;
    Ok(())
}
