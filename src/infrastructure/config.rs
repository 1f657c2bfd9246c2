//! Configuration management

use crate::error::{Result, StarmarkError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default soft-delete grace window: 24 hours, in milliseconds.
pub const DEFAULT_GRACE_PERIOD_MS: i64 = 86_400_000;

fn default_grace_period_ms() -> i64 {
    DEFAULT_GRACE_PERIOD_MS
}

/// Policy configuration, stored at `.starmark/config.toml`.
///
/// The grace period and the starred-only caching rule are product policy,
/// not derived invariants, so both are configurable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Account identifier partitioning tag/note storage; absent means the
    /// shared namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// How long an unstarred repository's data is retained before sweeping.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: i64,
    /// Whether observations of unstarred repositories are cached too.
    #[serde(default)]
    pub cache_unstarred: bool,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default policy values
    pub fn new(account: Option<String>) -> Self {
        Config {
            account,
            grace_period_ms: DEFAULT_GRACE_PERIOD_MS,
            cache_unstarred: false,
            created: Utc::now(),
        }
    }

    /// Load config from .starmark/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".starmark").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StarmarkError::NotStarmarkDirectory(path.to_path_buf())
            } else {
                StarmarkError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| StarmarkError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .starmark/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let data_dir = path.join(".starmark");
        let config_path = data_dir.join("config.toml");

        if !data_dir.exists() {
            fs::create_dir(&data_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| StarmarkError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Grace window as a chrono duration.
    pub fn grace_period(&self) -> Duration {
        Duration::milliseconds(self.grace_period_ms)
    }
}
