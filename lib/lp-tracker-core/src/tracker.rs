use crate::error::Error;
use crate::ladder::Ladder;
use crate::notify::{ChannelRef, Notifier};
use crate::persist::Persist;
use crate::store::{TrackedEntity, TrackingStore};
use tokio::sync::Mutex;
use tracing::info;

/// Everything the bot remembers between restarts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub store: TrackingStore,
    pub channel: Option<ChannelRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The name was already tracked and its record was reset.
    Replaced,
}

/// Sole owner of the [`TrackerState`]. Commands and sweeps go through the
/// same lock. Commands save a changed copy first and only apply it once the
/// save succeeded.
pub struct Tracker<L, N, P> {
    pub(crate) state: Mutex<TrackerState>,
    pub(crate) sweep_guard: Mutex<()>,
    pub(crate) ladder: L,
    pub(crate) notifier: N,
    pub(crate) persist: P,
}

impl<L, N, P> std::fmt::Debug for Tracker<L, N, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("state", &self.state)
            .finish()
    }
}

impl<L: Ladder, N: Notifier, P: Persist> Tracker<L, N, P> {
    pub fn new(state: TrackerState, ladder: L, notifier: N, persist: P) -> Self {
        Self {
            state: Mutex::new(state),
            sweep_guard: Mutex::new(()),
            ladder,
            notifier,
            persist,
        }
    }

    /// Resolve `name#tag` through the ladder API and start tracking it under
    /// `name`.
    pub async fn add(&self, name: &str, tag: &str) -> Result<AddOutcome, Error> {
        let external_id = self.ladder.resolve(name, tag).await?;

        let mut entity = TrackedEntity::new(name, external_id);
        entity.tag_line = Some(tag.to_string());

        let mut state = self.state.lock().await;
        let mut store = state.store.clone();
        let outcome = match store.add(entity) {
            Some(_) => AddOutcome::Replaced,
            None => AddOutcome::Added,
        };
        self.persist.save_store(&store).await?;
        state.store = store;
        info!("Tracking {name}#{tag} ({outcome:?})");
        Ok(outcome)
    }

    /// Stop tracking `name`. Returns whether it was tracked.
    pub async fn remove(&self, name: &str) -> Result<bool, Error> {
        let mut state = self.state.lock().await;
        let mut store = state.store.clone();
        if !store.remove(name) {
            return Ok(false);
        }
        self.persist.save_store(&store).await?;
        state.store = store;
        info!("Stopped tracking {name}");
        Ok(true)
    }

    /// Make `channel` the destination of all notifications.
    pub async fn set_channel(&self, channel: ChannelRef) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        self.persist.save_channel(Some(channel)).await?;
        state.channel = Some(channel);
        info!("Channel {channel:?} set for LP updates");
        Ok(())
    }

    /// Forget the destination if it is `channel`, e.g. after the channel was
    /// deleted. Returns whether it was unset.
    pub async fn unset_channel_if(&self, channel: ChannelRef) -> Result<bool, Error> {
        let mut state = self.state.lock().await;
        if state.channel != Some(channel) {
            return Ok(false);
        }
        self.persist.save_channel(None).await?;
        state.channel = None;
        info!("Channel {channel:?} unset");
        Ok(true)
    }

    pub async fn channel(&self) -> Option<ChannelRef> {
        self.state.lock().await.channel
    }

    pub async fn tracked(&self) -> Vec<TrackedEntity> {
        self.state.lock().await.store.snapshot()
    }
}
