//! Repository records and observations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached metadata for a single repository.
///
/// Every field other than `id` and `cached_at` is optional: records are built
/// up by merging partial observations, and a field absent from a new
/// observation keeps its previously cached value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub id: String,
    /// owner/repo slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forks: Option<u64>,
    /// Human-readable "Updated ..." text as shown on the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub cached_at: DateTime<Utc>,
}

impl RepoRecord {
    /// Build a fresh record from an observation.
    pub fn from_observation(observation: &RepoObservation, now: DateTime<Utc>) -> Self {
        let mut record = RepoRecord {
            id: observation.id.clone(),
            name: None,
            description: None,
            language: None,
            language_color: None,
            stars: None,
            forks: None,
            updated_display: None,
            updated_at: None,
            cached_at: now,
        };
        record.merge(observation, now);
        record
    }

    /// Merge an observation into this record.
    ///
    /// Fields present in the observation overwrite; absent fields keep their
    /// prior cached value. `cached_at` is always re-stamped. Values are taken
    /// as-is, the observer is trusted.
    pub fn merge(&mut self, observation: &RepoObservation, now: DateTime<Utc>) {
        if let Some(name) = &observation.name {
            self.name = Some(name.clone());
        }
        if let Some(description) = &observation.description {
            self.description = Some(description.clone());
        }
        if let Some(lang) = &observation.lang {
            self.language = Some(lang.clone());
        }
        if let Some(color) = &observation.lang_color {
            self.language_color = Some(color.clone());
        }
        if let Some(stars) = observation.stars {
            self.stars = Some(stars);
        }
        if let Some(forks) = observation.forks {
            self.forks = Some(forks);
        }
        if let Some(display) = &observation.updated_display {
            self.updated_display = Some(display.clone());
        }
        if let Some(timestamp) = observation.updated_timestamp {
            self.updated_at = Some(timestamp);
        }
        self.cached_at = now;
    }
}

/// A single repository sighting as reported by the page-scraping collaborator.
///
/// The wire shape is camelCase JSON; only `id` and `isCurrentlyStarred` are
/// required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoObservation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub lang_color: Option<String>,
    #[serde(default)]
    pub stars: Option<u64>,
    #[serde(default)]
    pub forks: Option<u64>,
    #[serde(default)]
    pub updated_display: Option<String>,
    #[serde(default)]
    pub updated_timestamp: Option<DateTime<Utc>>,
    pub is_currently_starred: bool,
}

impl RepoObservation {
    /// Minimal observation with only the required fields set.
    pub fn starred(id: &str) -> Self {
        RepoObservation {
            id: id.to_string(),
            name: None,
            description: None,
            lang: None,
            lang_color: None,
            stars: None,
            forks: None,
            updated_display: None,
            updated_timestamp: None,
            is_currently_starred: true,
        }
    }
}
