use crate::error::Error;
use crate::evaluator::{evaluate, ChangeEvent};
use crate::ladder::Ladder;
use crate::notify::{ChannelRef, Notifier};
use crate::persist::Persist;
use crate::store::TrackedEntity;
use crate::tracker::Tracker;
use chrono::Utc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Events that were delivered, in store order.
    pub notified: Vec<ChangeEvent>,
    /// Entities whose rank could not be fetched or recorded.
    pub skipped: Vec<String>,
    /// Entities whose rank was recorded but whose notification failed.
    pub delivery_failures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepOutcome {
    Completed(SweepReport),
    /// No channel is set, so nothing was polled.
    NoChannel,
    /// Another sweep was still in flight.
    AlreadyRunning,
}

enum EntityOutcome {
    Notified(ChangeEvent),
    DeliveryFailed,
    /// The name was re-added under another account while its rank was being
    /// fetched.
    Replaced,
}

impl<L: Ladder, N: Notifier, P: Persist> Tracker<L, N, P> {
    /// Poll every tracked entity once, notify about each one that could be
    /// fetched and save the store when done.
    ///
    /// Entities that cannot be fetched are skipped and left untouched. Only
    /// a failure to save is returned as an error.
    #[tracing::instrument(skip(self))]
    pub async fn sweep(&self) -> Result<SweepOutcome, Error> {
        let Ok(_guard) = self.sweep_guard.try_lock() else {
            warn!("Previous sweep still running, skipping");
            return Ok(SweepOutcome::AlreadyRunning);
        };

        let (entities, channel) = {
            let state = self.state.lock().await;
            (state.store.snapshot(), state.channel)
        };
        let Some(channel) = channel else {
            info!("No channel has been set for updates");
            return Ok(SweepOutcome::NoChannel);
        };

        info!("Sweeping {} tracked entities", entities.len());
        let mut report = SweepReport::default();
        for entity in &entities {
            match self.poll_entity(entity, channel).await {
                Ok(EntityOutcome::Notified(event)) => report.notified.push(event),
                Ok(EntityOutcome::DeliveryFailed) => {
                    report.delivery_failures.push(entity.name.clone())
                }
                Ok(EntityOutcome::Replaced) => {
                    info!("{} was re-added during the sweep, skipping", entity.name);
                    report.skipped.push(entity.name.clone());
                }
                Err(e) => {
                    warn!("Skipping {}: {e}", entity.name);
                    report.skipped.push(entity.name.clone());
                }
            }
        }

        debug!("Flushing store");
        let state = self.state.lock().await;
        self.persist.save_store(&state.store).await?;

        info!(
            "Sweep done: {} notified, {} skipped, {} undelivered",
            report.notified.len(),
            report.skipped.len(),
            report.delivery_failures.len()
        );
        Ok(SweepOutcome::Completed(report))
    }

    async fn poll_entity(
        &self,
        entity: &TrackedEntity,
        channel: ChannelRef,
    ) -> Result<EntityOutcome, Error> {
        debug!("Fetching {}", entity.name);
        let entry = self.ladder.ranked_entry(&entity.external_id).await?;

        let event = {
            let mut state = self.state.lock().await;
            // The fetched entry only belongs to the record if it still points
            // at the account it was fetched for
            let current = state
                .store
                .get(&entity.name)
                .ok_or_else(|| Error::NotFound(entity.name.clone()))?;
            if current.external_id != entity.external_id {
                return Ok(EntityOutcome::Replaced);
            }
            let previous = current.last_rank;
            debug!("Evaluating {}", entity.name);
            let event = evaluate(
                &entity.name,
                previous.as_ref(),
                entry.rank,
                entry.wins,
                entry.losses,
            );
            state.store.update_rank(&entity.name, entry.rank, Utc::now())?;
            event
        };

        debug!("Notifying about {}", entity.name);
        match self
            .notifier
            .deliver(channel, &event.to_notification())
            .await
        {
            Ok(()) => Ok(EntityOutcome::Notified(event)),
            Err(e) => {
                error!("Failed sending update for {}: {e:?}", entity.name);
                Ok(EntityOutcome::DeliveryFailed)
            }
        }
    }
}
