use crate::command::{CommandError, Data};
use crate::scheduler::escalate;
use lp_tracker_core::SweepOutcome;

/// Check every tracked summoner now instead of waiting for the next scheduled check
#[poise::command(slash_command)]
pub async fn check_lp(ctx: poise::Context<'_, Data, CommandError>) -> Result<(), CommandError> {
    ctx.defer().await?;

    let result = ctx.data().tracker.sweep().await;
    let Some(outcome) = escalate(result, &ctx.data().fatal).await else {
        ctx.reply("Failed to save tracked summoners, shutting down.")
            .await?;
        return Ok(());
    };

    let message = match outcome {
        SweepOutcome::Completed(report) if report.skipped.is_empty() => format!(
            "Checked {} summoners.",
            report.notified.len() + report.delivery_failures.len()
        ),
        SweepOutcome::Completed(report) => format!(
            "Checked {} summoners, could not fetch {}.",
            report.notified.len() + report.delivery_failures.len(),
            report.skipped.join(", ")
        ),
        SweepOutcome::NoChannel => "No channel has been set for updates, use /set_channel first."
            .to_string(),
        SweepOutcome::AlreadyRunning => "A check is already running.".to_string(),
    };
    ctx.reply(message).await?;
    Ok(())
}
