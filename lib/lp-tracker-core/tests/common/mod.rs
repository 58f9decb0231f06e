#![allow(dead_code)]

use async_trait::async_trait;
use lp_tracker_core::{
    ChannelRef, Error, Ladder, Notification, Notifier, Persist, Rank, RankedEntry, Tracker,
    TrackerState, TrackingStore,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Clone, Default)]
pub struct FakeLadder {
    accounts: Arc<Mutex<HashMap<(String, String), String>>>,
    entries: Arc<Mutex<HashMap<String, RankedEntry>>>,
    /// When set, `ranked_entry` signals `entered` and waits for `release`.
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl FakeLadder {
    /// Ladder whose every `ranked_entry` call signals `entered` and then
    /// blocks until `release` is notified.
    pub fn gated(entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            gate: Some((entered, release)),
            ..Default::default()
        }
    }

    pub fn with_account(self, name: &str, tag: &str, id: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert((name.into(), tag.into()), id.into());
        self
    }

    pub fn set_entry(&self, id: &str, rank: &str, wins: u32, losses: u32) {
        let entry = RankedEntry {
            rank: rank.parse::<Rank>().unwrap(),
            wins,
            losses,
        };
        self.entries.lock().unwrap().insert(id.into(), entry);
    }

    pub fn clear_entry(&self, id: &str) {
        self.entries.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl Ladder for FakeLadder {
    async fn resolve(&self, name: &str, tag: &str) -> Result<String, Error> {
        self.accounts
            .lock()
            .unwrap()
            .get(&(name.to_string(), tag.to_string()))
            .cloned()
            .ok_or_else(|| Error::AccountNotFound(format!("{name}#{tag}")))
    }

    async fn ranked_entry(&self, external_id: &str) -> Result<RankedEntry, Error> {
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        self.entries
            .lock()
            .unwrap()
            .get(external_id)
            .copied()
            .ok_or_else(|| Error::UpstreamUnavailable(format!("no entry for {external_id}")))
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(ChannelRef, Notification)>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, notification)| notification.title.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(
        &self,
        channel: ChannelRef,
        notification: &Notification,
    ) -> Result<(), Error> {
        if self.fail {
            return Err(Error::Delivery("channel unreachable".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel, notification.clone()));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryPersist {
    pub store_saves: Arc<Mutex<Vec<TrackingStore>>>,
    pub channel_saves: Arc<Mutex<Vec<Option<ChannelRef>>>>,
    pub fail: bool,
}

impl MemoryPersist {
    pub fn store_save_count(&self) -> usize {
        self.store_saves.lock().unwrap().len()
    }

    pub fn last_store(&self) -> Option<TrackingStore> {
        self.store_saves.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Persist for MemoryPersist {
    async fn save_store(&self, store: &TrackingStore) -> Result<(), Error> {
        if self.fail {
            return Err(Error::Persistence("disk full".into()));
        }
        self.store_saves.lock().unwrap().push(store.clone());
        Ok(())
    }

    async fn save_channel(&self, channel: Option<ChannelRef>) -> Result<(), Error> {
        if self.fail {
            return Err(Error::Persistence("disk full".into()));
        }
        self.channel_saves.lock().unwrap().push(channel);
        Ok(())
    }
}

pub type TestTracker = Tracker<FakeLadder, RecordingNotifier, MemoryPersist>;

pub const CHANNEL: ChannelRef = ChannelRef(42);

/// Tracker with `names` already tracked (as `id-<name>`) and [`CHANNEL`] set.
pub fn tracker_with(
    names: &[&str],
    ladder: FakeLadder,
    notifier: RecordingNotifier,
    persist: MemoryPersist,
) -> TestTracker {
    let mut store = TrackingStore::new();
    for name in names {
        store.add(lp_tracker_core::TrackedEntity::new(*name, format!("id-{name}")));
    }
    let state = TrackerState {
        store,
        channel: Some(CHANNEL),
    };
    Tracker::new(state, ladder, notifier, persist)
}
