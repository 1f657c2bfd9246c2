//! Observation intake use case

use crate::domain::RepoObservation;
use crate::error::{Result, StarmarkError};
use crate::infrastructure::{poll_until, AnnotationStore, WatchOutcome};
use std::path::Path;
use std::time::Duration;

/// What one observation batch did to the store.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ObserveReport {
    /// Records created or merge-updated in the active cache.
    pub cached: usize,
    /// Repositories restored from the pending-deletion set first.
    pub restored: usize,
    /// Unstarred observations skipped under the starred-only policy.
    pub skipped: usize,
}

/// Service for ingesting repository observations from the page-scraping
/// collaborator.
pub struct ObserveService {
    store: AnnotationStore,
    cache_unstarred: bool,
}

impl ObserveService {
    pub fn new(store: AnnotationStore, cache_unstarred: bool) -> Self {
        ObserveService {
            store,
            cache_unstarred,
        }
    }

    /// Apply a batch of observations in order.
    ///
    /// A starred observation for a repository sitting in the pending set
    /// restores it first; observing it starred is the same signal as a
    /// re-star. Unstarred observations are skipped unless the policy caches
    /// them; for a repository sitting in the pending set they merge into the
    /// pending snapshot, so the id never appears in the active cache and the
    /// pending set at once.
    pub fn execute(&self, observations: &[RepoObservation]) -> Result<ObserveReport> {
        let mut report = ObserveReport::default();

        for observation in observations {
            if observation.is_currently_starred {
                if self.store.mark_starred(&observation.id)? {
                    report.restored += 1;
                }
                self.store.upsert_repo(observation)?;
                report.cached += 1;
            } else if self.cache_unstarred {
                if !self.store.merge_into_pending(observation)? {
                    self.store.upsert_repo(observation)?;
                }
                report.cached += 1;
            } else {
                report.skipped += 1;
            }
        }

        Ok(report)
    }

    /// Poll a file on a bounded schedule until it first yields parseable
    /// observations, then apply them. Returns None when the deadline passes
    /// without a successful parse.
    pub fn execute_watch(
        &self,
        path: &Path,
        interval: Duration,
        timeout: Duration,
    ) -> Result<Option<ObserveReport>> {
        let outcome = poll_until(interval, timeout, || {
            let contents = std::fs::read_to_string(path).ok()?;
            parse_observations(&contents).ok()
        });

        match outcome {
            WatchOutcome::Observed(observations) => self.execute(&observations).map(Some),
            WatchOutcome::Expired => Ok(None),
        }
    }
}

/// Parse observation JSON: a single object or an array of objects.
pub fn parse_observations(input: &str) -> Result<Vec<RepoObservation>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(StarmarkError::Observation("empty input".to_string()));
    }

    if input.starts_with('[') {
        serde_json::from_str(input).map_err(|e| StarmarkError::Observation(e.to_string()))
    } else {
        let observation: RepoObservation =
            serde_json::from_str(input).map_err(|e| StarmarkError::Observation(e.to_string()))?;
        Ok(vec![observation])
    }
}
