use crate::command::BotTracker;
use anyhow::Context;
use lp_tracker_core::{Error, SweepOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Sender half of the channel `main` waits on. Anything sent here shuts the
/// bot down.
pub type FatalSender = mpsc::Sender<anyhow::Error>;

/// Pass a successful sweep result through. A failed sweep could not save the
/// tracked summoners, so it is handed to `fatal` instead.
pub async fn escalate<T>(result: Result<T, Error>, fatal: &FatalSender) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Sweep failed: {e:?}");
            let e = anyhow::Error::new(e).context("Failed to save tracked summoners");
            if fatal.send(e).await.is_err() {
                error!("Shutdown already in progress");
            }
            None
        }
    }
}

/// Sweep once immediately and then every `period`. Only returns after a
/// sweep failed to save the tracked summoners.
pub async fn run(tracker: Arc<BotTracker>, period: Duration, fatal: FatalSender) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let Some(outcome) = escalate(tracker.sweep().await, &fatal).await else {
            return;
        };
        match outcome {
            SweepOutcome::Completed(report) => info!(
                "Scheduled check done, {} notified, {} skipped",
                report.notified.len(),
                report.skipped.len()
            ),
            SweepOutcome::NoChannel => info!("Scheduled check skipped, no channel set"),
            SweepOutcome::AlreadyRunning => info!("Scheduled check skipped, check in flight"),
        }
        debug!("Next check in {}s", period.as_secs());
    }
}

/// Wait for the first fatal error sent by a sweep.
pub async fn first_fatal(mut fatal: mpsc::Receiver<anyhow::Error>) -> anyhow::Result<()> {
    match fatal.recv().await {
        Some(e) => Err(e),
        None => Ok(()),
    }
    .context("Stopping after a failed sweep")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_sweep_is_escalated() {
        let (tx, rx) = mpsc::channel(1);
        let result: Result<SweepOutcome, Error> = Err(Error::Persistence("disk full".into()));

        assert!(escalate(result, &tx).await.is_none());

        let err = first_fatal(rx).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to save tracked summoners"));
    }

    #[tokio::test]
    async fn successful_sweep_passes_through() {
        let (tx, mut rx) = mpsc::channel(1);

        assert_eq!(
            escalate(Ok(SweepOutcome::NoChannel), &tx).await,
            Some(SweepOutcome::NoChannel)
        );
        assert!(rx.try_recv().is_err());
    }
}
