use crate::command::{CommandError, Data};
use lp_tracker_core::{AddOutcome, Error};
use tracing::warn;

/// Add a summoner to the tracking list using their Riot ID
#[poise::command(slash_command)]
pub async fn add_summoner(
    ctx: poise::Context<'_, Data, CommandError>,
    #[description = "Game Name"] game_name: String,
    #[description = "Tag Line"] tag_line: String,
) -> Result<(), CommandError> {
    // Resolving takes two API calls
    ctx.defer().await?;

    let message = match ctx.data().tracker.add(&game_name, &tag_line).await {
        Ok(AddOutcome::Added) => format!("**{game_name}#{tag_line}** added to the list."),
        Ok(AddOutcome::Replaced) => {
            format!("**{game_name}#{tag_line}** was already tracked, its record was reset.")
        }
        Err(Error::AccountNotFound(_)) => {
            format!("Failed to find the Riot ID **{game_name}#{tag_line}**.")
        }
        Err(Error::UpstreamUnavailable(e)) => {
            warn!("Failed to resolve {game_name}#{tag_line}: {e}");
            format!("Could not look up **{game_name}#{tag_line}** right now, try again later.")
        }
        Err(e) => return Err(e.into()),
    };
    ctx.reply(message).await?;
    Ok(())
}
