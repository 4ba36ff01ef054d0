//! Engine configuration and policy loading.
//!
//! Both files live in ~/.mindcare/ (or the `--data-dir` override). Missing
//! or unreadable files fall back to defaults; a policy file that parses but
//! fails validation is rejected with a warning and the built-in tables apply.

use crate::core::constants::{CONFIG_FILENAME, DEFAULT_POLL_INTERVAL_SECS, POLICY_FILENAME};
use crate::core::time_window::utc_offset;
use crate::engine::PolicyTables;
use crate::error::Result;
use crate::mood::MessageSelection;
use crate::storage::persistence::{load_json_or_default_in, mindcare_dir, save_json_in};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// User whose snapshot the CLI and scheduler act on
    pub user_id: String,

    /// Minutes east of UTC used for local hour and calendar day
    pub utc_offset_minutes: i32,

    /// Reminder polling cadence
    pub poll_interval_secs: u64,

    pub message_selection: MessageSelection,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
            utc_offset_minutes: 0,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            message_selection: MessageSelection::default(),
        }
    }
}

impl EngineConfig {
    /// Always picks the first candidate line. Used by tests and demos.
    pub fn deterministic() -> Self {
        Self {
            message_selection: MessageSelection::First,
            ..Default::default()
        }
    }

    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn offset(&self) -> Result<FixedOffset> {
        utc_offset(self.utc_offset_minutes)
    }

    /// Never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// Resolves the data directory: the explicit override or ~/.mindcare/.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(mindcare_dir()?),
    }
}

pub fn load_config(dir: &Path) -> EngineConfig {
    load_json_or_default_in(dir, CONFIG_FILENAME)
}

pub fn save_config(dir: &Path, config: &EngineConfig) -> Result<()> {
    Ok(save_json_in(dir, CONFIG_FILENAME, config)?)
}

pub fn load_policy(dir: &Path) -> PolicyTables {
    let tables: PolicyTables = load_json_or_default_in(dir, POLICY_FILENAME);
    match tables.validate() {
        Ok(()) => {
            if dir.join(POLICY_FILENAME).exists() {
                info!(path = %dir.join(POLICY_FILENAME).display(), "loaded custom policy tables");
            }
            tables
        }
        Err(e) => {
            warn!(error = %e, "invalid policy file, using built-in tables");
            PolicyTables::default()
        }
    }
}
