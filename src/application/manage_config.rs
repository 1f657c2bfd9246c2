//! Config management use case

use crate::error::{Result, StarmarkError};
use crate::infrastructure::{Config, FileStore};

/// Service for managing policy configuration
pub struct ConfigService {
    store: FileStore,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(store: FileStore) -> Self {
        ConfigService { store }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.store.load_config()?;

        match key {
            "account" => Ok(config
                .account
                .unwrap_or_else(|| "shared".to_string())),
            "grace_period_ms" => Ok(config.grace_period_ms.to_string()),
            "cache_unstarred" => Ok(config.cache_unstarred.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(StarmarkError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: account, grace_period_ms, \
                cache_unstarred, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.store.load_config()?;

        match key {
            "account" => {
                // "shared" drops back to the shared namespace
                if value == "shared" || value.trim().is_empty() {
                    config.account = None;
                } else {
                    config.account = Some(value.to_string());
                }
            }
            "grace_period_ms" => {
                let ms: i64 = value.parse().map_err(|_| {
                    StarmarkError::Config(format!("Invalid grace_period_ms: '{}'", value))
                })?;
                if ms < 0 {
                    return Err(StarmarkError::Config(format!(
                        "Invalid grace_period_ms: '{}' (must be non-negative)",
                        value
                    )));
                }
                config.grace_period_ms = ms;
            }
            "cache_unstarred" => {
                config.cache_unstarred = match value {
                    "true" => true,
                    "false" => false,
                    _ => {
                        return Err(StarmarkError::Config(format!(
                            "Invalid cache_unstarred: '{}'",
                            value
                        )))
                    }
                };
            }
            "created" => {
                return Err(StarmarkError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(StarmarkError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: account, grace_period_ms, \
                    cache_unstarred",
                    key
                )));
            }
        }

        self.store.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.store.load_config()
    }
}
