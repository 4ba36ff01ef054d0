//! Typed access to progression snapshots and achievement ledgers.

use super::kv::KeyValueStore;
use crate::achievements::Achievements;
use crate::character::CharacterId;
use crate::core::constants::PROGRESSION_KEY_PREFIX;
use crate::core::UserProgressionState;
use crate::error::Result;
use crate::notifications::SnapshotSource;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

const ACHIEVEMENTS_KEY_PREFIX: &str = "achievements";

pub struct ProgressionRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProgressionRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn state_key(user_id: &str) -> String {
        format!("{}:{}", PROGRESSION_KEY_PREFIX, user_id)
    }

    fn achievements_key(user_id: &str) -> String {
        format!("{}:{}", ACHIEVEMENTS_KEY_PREFIX, user_id)
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Result<Option<T>> {
        match self.store.get(key, now)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T, now: DateTime<Utc>) -> Result<()> {
        self.store.set(key, serde_json::to_value(value)?, None, now)
    }

    /// Stored snapshot, or a fresh one with `character` for unknown users.
    /// An unreadable snapshot is an error so a later save cannot overwrite it.
    pub fn load(&self, user_id: &str, character: CharacterId, now: DateTime<Utc>) -> Result<UserProgressionState> {
        match self.get_json(&Self::state_key(user_id), now)? {
            Some(state) => Ok(state),
            None => {
                info!(user = user_id, "no saved progression, starting fresh");
                Ok(UserProgressionState::new(user_id, character))
            }
        }
    }

    pub fn save(&self, state: &UserProgressionState, now: DateTime<Utc>) -> Result<()> {
        self.set_json(&Self::state_key(&state.user_id), state, now)
    }

    pub fn load_achievements(&self, user_id: &str, now: DateTime<Utc>) -> Result<Achievements> {
        Ok(self
            .get_json(&Self::achievements_key(user_id), now)?
            .unwrap_or_default())
    }

    pub fn save_achievements(&self, user_id: &str, ledger: &Achievements, now: DateTime<Utc>) -> Result<()> {
        self.set_json(&Self::achievements_key(user_id), ledger, now)
    }

    /// Removes both the snapshot and the ledger.
    pub fn reset(&self, user_id: &str) -> Result<()> {
        self.store.remove(&Self::state_key(user_id))?;
        self.store.remove(&Self::achievements_key(user_id))?;
        Ok(())
    }
}

impl<S: KeyValueStore + 'static> ProgressionRepository<S> {
    /// Snapshot source for the reminder scheduler, reading at wall-clock time.
    pub fn snapshot_source(self: Arc<Self>, user_id: impl Into<String>) -> Arc<dyn SnapshotSource> {
        let user_id = user_id.into();
        Arc::new(move || -> Result<UserProgressionState> {
            self.load(&user_id, CharacterId::default(), Utc::now())
        })
    }
}
