use crate::error::Error;
use crate::rank::{LpScalar, Rank};
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
    /// Display name, unique within the store. Serialized as the map key.
    #[serde(skip)]
    pub name: String,
    #[serde(alias = "encrypted_summoner_id")]
    pub external_id: String,
    #[serde(default)]
    pub tag_line: Option<String>,
    #[serde(default)]
    pub last_rank: Option<Rank>,
    #[serde(default)]
    pub last_scalar: Option<LpScalar>,
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
}

impl TrackedEntity {
    pub fn new(name: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_id: external_id.into(),
            tag_line: None,
            last_rank: None,
            last_scalar: None,
            last_checked: None,
        }
    }

    /// `name#tag` when the tag line is known.
    pub fn riot_id(&self) -> String {
        match &self.tag_line {
            Some(tag) => format!("{}#{}", self.name, tag),
            None => self.name.clone(),
        }
    }
}

/// Tracked entities keyed by display name, kept in insertion order.
///
/// Serializes as a flat map from display name to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingStore {
    entities: Vec<TrackedEntity>,
}

impl TrackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TrackedEntity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut TrackedEntity> {
        self.entities.iter_mut().find(|entity| entity.name == name)
    }

    /// Start tracking `entity`. An existing entry with the same name is
    /// replaced in place and returned.
    pub fn add(&mut self, entity: TrackedEntity) -> Option<TrackedEntity> {
        match self.get_mut(&entity.name) {
            Some(existing) => Some(std::mem::replace(existing, entity)),
            None => {
                self.entities.push(entity);
                None
            }
        }
    }

    /// Stop tracking `name`, returning whether it was tracked.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.name != name);
        self.entities.len() != before
    }

    /// Record a successful observation of `name`.
    pub fn update_rank(
        &mut self,
        name: &str,
        rank: Rank,
        observed_at: DateTime<Utc>,
    ) -> Result<&TrackedEntity, Error> {
        let entity = self
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        entity.last_rank = Some(rank);
        entity.last_scalar = Some(rank.scalar());
        entity.last_checked = Some(observed_at);
        Ok(entity)
    }

    /// Owned copy of every entity, in insertion order.
    pub fn snapshot(&self) -> Vec<TrackedEntity> {
        self.entities.clone()
    }
}

impl Serialize for TrackingStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entities.iter().map(|entity| (&entity.name, entity)))
    }
}

impl<'de> Deserialize<'de> for TrackingStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = TrackingStore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of display names to tracked entities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut store = TrackingStore::new();
                while let Some((name, mut entity)) = map.next_entry::<String, TrackedEntity>()? {
                    entity.name = name;
                    store.add(entity);
                }
                Ok(store)
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}
