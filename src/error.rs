//! Error types for starmark

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the starmark application
#[derive(Debug, Error)]
pub enum StarmarkError {
    #[error("Not a starmark directory: {0}")]
    NotStarmarkDirectory(PathBuf),

    #[error("Invalid tag label: {0}")]
    InvalidTag(String),

    #[error("Observation error: {0}")]
    Observation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl StarmarkError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StarmarkError::NotStarmarkDirectory(_) => 2,
            StarmarkError::InvalidTag(_) => 3,
            StarmarkError::Observation(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            StarmarkError::NotStarmarkDirectory(path) => {
                format!(
                    "Not a starmark directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'starmark init' in this directory to create a new star cache\n\
                    • Navigate to an existing starmark directory\n\
                    • Set STARMARK_ROOT environment variable to your cache path",
                    path.display()
                )
            }
            StarmarkError::InvalidTag(label) => {
                format!(
                    "Invalid tag label: '{}'\n\n\
                    Tag labels may contain letters, digits, '_' and '-'.\n\n\
                    Examples:\n\
                    starmark tag 12345 rust cli\n\
                    starmark tag 12345 project-alpha",
                    label
                )
            }
            StarmarkError::Observation(msg) => {
                format!(
                    "Observation error: {}\n\n\
                    Suggestions:\n\
                    • Observations are JSON: a single object or an array of objects\n\
                    • Each object needs at least \"id\" and \"isCurrentlyStarred\"\n\
                    • Pipe scraper output: cat repos.json | starmark observe",
                    msg
                )
            }
            StarmarkError::Config(msg) => {
                if msg.contains("grace_period_ms") {
                    format!(
                        "{}\n\n\
                        grace_period_ms is a duration in milliseconds.\n\
                        Example: starmark config grace_period_ms 86400000",
                        msg
                    )
                } else if msg.contains("cache_unstarred") {
                    format!(
                        "{}\n\n\
                        Valid values: true, false\n\
                        Example: starmark config cache_unstarred false",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using StarmarkError
pub type Result<T> = std::result::Result<T, StarmarkError>;
