//! Pending-deletion entries for unstarred repositories

use crate::domain::RepoRecord;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a repository taken when it was unstarred.
///
/// Holds the record together with its tags and note so a re-star within the
/// grace period can restore everything. A repository id lives in at most one
/// of the active cache and the pending set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEntry {
    pub unstarred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    pub record: RepoRecord,
}

impl PendingEntry {
    pub fn new(
        record: RepoRecord,
        tags: Vec<String>,
        note: String,
        unstarred_at: DateTime<Utc>,
    ) -> Self {
        PendingEntry {
            unstarred_at,
            tags,
            note,
            record,
        }
    }

    /// Whether this entry has outlived the grace period at `now`.
    ///
    /// Strictly greater: an entry exactly at the boundary is retained.
    pub fn is_expired(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        now - self.unstarred_at > grace
    }
}
