//! Star/unstar lifecycle use case

use crate::error::Result;
use crate::infrastructure::AnnotationStore;
use chrono::{DateTime, Utc};

/// Service driving the starred/unstarred transitions and the grace-period
/// sweep. The network action against the host site happens elsewhere; this
/// runs only after it succeeded, so a failed action leaves the store
/// untouched.
pub struct StarService {
    store: AnnotationStore,
}

impl StarService {
    pub fn new(store: AnnotationStore) -> Self {
        StarService { store }
    }

    /// Record a successful star. Returns whether a pending entry was
    /// restored.
    pub fn star(&self, id: &str) -> Result<bool> {
        self.store.mark_starred(id)
    }

    /// Record a successful unstar. Returns whether an active record moved
    /// into the pending set.
    pub fn unstar(&self, id: &str) -> Result<bool> {
        self.store.mark_unstarred(id)
    }

    /// Discard pending entries past the grace period; returns the count.
    pub fn sweep(&self, now: DateTime<Utc>) -> Result<usize> {
        self.store.sweep_expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepoObservation;
    use crate::infrastructure::FileStore;
    use chrono::Duration;
    use tempfile::TempDir;

    fn service_with_grace(temp: &TempDir, grace_ms: i64) -> StarService {
        let backend = FileStore::new(temp.path().to_path_buf());
        if !backend.is_initialized() {
            backend.initialize().unwrap();
        }
        let store =
            AnnotationStore::open(backend, None, Duration::milliseconds(grace_ms)).unwrap();
        StarService::new(store)
    }

    #[test]
    fn test_unstar_then_star_reports_transitions() {
        let temp = TempDir::new().unwrap();
        let service = service_with_grace(&temp, 86_400_000);

        let backend = FileStore::new(temp.path().to_path_buf());
        let store =
            AnnotationStore::open(backend, None, Duration::milliseconds(86_400_000)).unwrap();
        store
            .upsert_repo(&RepoObservation::starred("42"))
            .unwrap();

        assert!(service.unstar("42").unwrap());
        assert!(!service.unstar("42").unwrap());
        assert!(service.star("42").unwrap());
        assert!(!service.star("42").unwrap());
    }

    #[test]
    fn test_sweep_with_zero_grace_discards_pending() {
        let temp = TempDir::new().unwrap();
        let service = service_with_grace(&temp, 0);

        let backend = FileStore::new(temp.path().to_path_buf());
        let store = AnnotationStore::open(backend, None, Duration::zero()).unwrap();
        store
            .upsert_repo(&RepoObservation::starred("42"))
            .unwrap();
        service.unstar("42").unwrap();

        let removed = service.sweep(Utc::now() + Duration::milliseconds(5)).unwrap();
        assert_eq!(removed, 1);
        assert!(!service.star("42").unwrap());
    }
}
