//! Repository annotation store
//!
//! Durable, namespaced key-value storage for repository metadata, tags and
//! notes, with soft-delete semantics: unstarring moves a repository's data
//! into a pending-deletion set where it survives for a grace period, and
//! re-starring within that window restores it.

use crate::domain::{AccountNamespace, PendingEntry, RepoObservation, RepoRecord};
use crate::error::Result;
use crate::infrastructure::store::StorageBackend;
use crate::infrastructure::FileStore;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

const REPOS_KEY: &str = "repos";
const PENDING_KEY: &str = "pending";
const MIGRATED_KEY: &str = "migrated";

/// The annotation store: all reads and writes of cached repository data go
/// through here. Every operation is a single synchronous read-modify-write
/// of the backing documents; absent keys always read as empty values.
pub struct AnnotationStore {
    backend: FileStore,
    namespace: AccountNamespace,
    grace: Duration,
}

impl AnnotationStore {
    /// Open the store for an account namespace.
    ///
    /// The first time a given account identifier is seen, any pre-existing
    /// shared-namespace tags and notes are copied into its namespace
    /// (without overwriting per-account entries that already exist).
    pub fn open(
        backend: FileStore,
        account: Option<String>,
        grace: Duration,
    ) -> Result<Self> {
        let namespace = AccountNamespace::from_option(account.as_deref());
        let store = AnnotationStore {
            backend,
            namespace,
            grace,
        };
        store.migrate_shared_if_needed()?;
        Ok(store)
    }

    pub fn namespace(&self) -> &AccountNamespace {
        &self.namespace
    }

    /// Merge an observation into the active cache, stamping `cached_at`.
    /// Creates the record if absent; persisted immediately.
    pub fn upsert_repo(&self, observation: &RepoObservation) -> Result<RepoRecord> {
        let now = Utc::now();
        let mut repos: BTreeMap<String, RepoRecord> = self.backend.read_map(REPOS_KEY)?;

        let record = match repos.get_mut(&observation.id) {
            Some(existing) => {
                existing.merge(observation, now);
                existing.clone()
            }
            None => {
                let record = RepoRecord::from_observation(observation, now);
                repos.insert(observation.id.clone(), record.clone());
                record
            }
        };

        self.backend.write_map(REPOS_KEY, &repos)?;
        Ok(record)
    }

    pub fn get_repo(&self, id: &str) -> Result<Option<RepoRecord>> {
        let repos: BTreeMap<String, RepoRecord> = self.backend.read_map(REPOS_KEY)?;
        Ok(repos.get(id).cloned())
    }

    /// All active records, keyed by repository id.
    pub fn all_repos(&self) -> Result<BTreeMap<String, RepoRecord>> {
        self.backend.read_map(REPOS_KEY)
    }

    pub fn get_tags(&self, id: &str) -> Result<Vec<String>> {
        let tags: BTreeMap<String, Vec<String>> =
            self.backend.read_map(&self.namespace.tags_key())?;
        Ok(tags.get(id).cloned().unwrap_or_default())
    }

    /// Replace the full tag sequence for a repository.
    /// An empty sequence removes the entry entirely; the store never retains
    /// empty-collection entries.
    pub fn set_tags(&self, id: &str, tags: &[String]) -> Result<()> {
        let key = self.namespace.tags_key();
        let mut map: BTreeMap<String, Vec<String>> = self.backend.read_map(&key)?;

        if tags.is_empty() {
            map.remove(id);
        } else {
            map.insert(id.to_string(), tags.to_vec());
        }

        self.backend.write_map(&key, &map)
    }

    pub fn get_note(&self, id: &str) -> Result<String> {
        let notes: BTreeMap<String, String> =
            self.backend.read_map(&self.namespace.notes_key())?;
        Ok(notes.get(id).cloned().unwrap_or_default())
    }

    /// Set the note for a repository; empty text removes the entry.
    pub fn set_note(&self, id: &str, text: &str) -> Result<()> {
        let key = self.namespace.notes_key();
        let mut map: BTreeMap<String, String> = self.backend.read_map(&key)?;

        if text.is_empty() {
            map.remove(id);
        } else {
            map.insert(id.to_string(), text.to_string());
        }

        self.backend.write_map(&key, &map)
    }

    /// The full tag map for the current namespace.
    pub fn tag_map(&self) -> Result<BTreeMap<String, Vec<String>>> {
        self.backend.read_map(&self.namespace.tags_key())
    }

    /// Union of all tags across the current namespace, ordered
    /// case-insensitively for stable display.
    pub fn all_unique_tags(&self) -> Result<Vec<String>> {
        let map = self.tag_map()?;

        let mut unique: Vec<String> = Vec::new();
        for tags in map.values() {
            for tag in tags {
                if !unique.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                    unique.push(tag.clone());
                }
            }
        }
        unique.sort_by_key(|t| t.to_lowercase());

        Ok(unique)
    }

    /// Move a repository into the pending-deletion set.
    ///
    /// Snapshots its record, tags and note with `unstarred_at = now`, and
    /// clears all three from active storage. No-op when the repository has
    /// no active record, so an id lives in at most one of the active cache
    /// and the pending set. Returns whether anything moved.
    pub fn mark_unstarred(&self, id: &str) -> Result<bool> {
        let mut repos: BTreeMap<String, RepoRecord> = self.backend.read_map(REPOS_KEY)?;
        let record = match repos.remove(id) {
            Some(record) => record,
            None => return Ok(false),
        };

        let tags = self.get_tags(id)?;
        let note = self.get_note(id)?;

        let mut pending: BTreeMap<String, PendingEntry> = self.backend.read_map(PENDING_KEY)?;
        pending.insert(
            id.to_string(),
            PendingEntry::new(record, tags, note, Utc::now()),
        );

        self.backend.write_map(PENDING_KEY, &pending)?;
        self.backend.write_map(REPOS_KEY, &repos)?;
        self.set_tags(id, &[])?;
        self.set_note(id, "")?;

        Ok(true)
    }

    /// Restore a repository from the pending-deletion set.
    ///
    /// Puts the snapshotted record back into the active cache and reattaches
    /// the snapshotted tags and note if non-empty. No-op when nothing is
    /// pending for the id. Returns whether anything was restored.
    pub fn mark_starred(&self, id: &str) -> Result<bool> {
        let mut pending: BTreeMap<String, PendingEntry> = self.backend.read_map(PENDING_KEY)?;
        let entry = match pending.remove(id) {
            Some(entry) => entry,
            None => return Ok(false),
        };

        let mut repos: BTreeMap<String, RepoRecord> = self.backend.read_map(REPOS_KEY)?;
        repos.insert(id.to_string(), entry.record);

        self.backend.write_map(REPOS_KEY, &repos)?;
        self.backend.write_map(PENDING_KEY, &pending)?;

        if !entry.tags.is_empty() {
            self.set_tags(id, &entry.tags)?;
        }
        if !entry.note.is_empty() {
            self.set_note(id, &entry.note)?;
        }

        Ok(true)
    }

    /// Merge an observation into a pending entry's record snapshot, leaving
    /// `unstarred_at` and the snapshotted tags/note alone.
    ///
    /// Keeps a repository out of the active cache while it sits in the
    /// pending set; an id lives in at most one of the two. Returns whether a
    /// pending entry existed.
    pub fn merge_into_pending(&self, observation: &RepoObservation) -> Result<bool> {
        let mut pending: BTreeMap<String, PendingEntry> = self.backend.read_map(PENDING_KEY)?;
        let entry = match pending.get_mut(&observation.id) {
            Some(entry) => entry,
            None => return Ok(false),
        };

        entry.record.merge(observation, Utc::now());
        self.backend.write_map(PENDING_KEY, &pending)?;
        Ok(true)
    }

    /// Discard pending entries older than the grace period.
    ///
    /// Runs opportunistically at command start, never on a timer. Returns
    /// the number of entries discarded.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut pending: BTreeMap<String, PendingEntry> = self.backend.read_map(PENDING_KEY)?;

        let before = pending.len();
        pending.retain(|_, entry| !entry.is_expired(now, self.grace));
        let removed = before - pending.len();

        if removed > 0 {
            self.backend.write_map(PENDING_KEY, &pending)?;
        }

        Ok(removed)
    }

    /// Whether a repository currently sits in the pending-deletion set.
    pub fn is_pending(&self, id: &str) -> Result<bool> {
        let pending: BTreeMap<String, PendingEntry> = self.backend.read_map(PENDING_KEY)?;
        Ok(pending.contains_key(id))
    }

    /// One-time copy of shared-namespace tags and notes into a newly seen
    /// account namespace. Existing per-account entries are never overwritten
    /// and the shared data is left in place.
    fn migrate_shared_if_needed(&self) -> Result<()> {
        if self.namespace.is_shared() {
            return Ok(());
        }

        let label = self.namespace.label_sanitized();
        let mut migrated: BTreeMap<String, DateTime<Utc>> =
            self.backend.read_map(MIGRATED_KEY)?;
        if migrated.contains_key(&label) {
            return Ok(());
        }

        let shared = AccountNamespace::Shared;

        let shared_tags: BTreeMap<String, Vec<String>> =
            self.backend.read_map(&shared.tags_key())?;
        if !shared_tags.is_empty() {
            let key = self.namespace.tags_key();
            let mut tags: BTreeMap<String, Vec<String>> = self.backend.read_map(&key)?;
            for (id, labels) in shared_tags {
                tags.entry(id).or_insert(labels);
            }
            self.backend.write_map(&key, &tags)?;
        }

        let shared_notes: BTreeMap<String, String> =
            self.backend.read_map(&shared.notes_key())?;
        if !shared_notes.is_empty() {
            let key = self.namespace.notes_key();
            let mut notes: BTreeMap<String, String> = self.backend.read_map(&key)?;
            for (id, text) in shared_notes {
                notes.entry(id).or_insert(text);
            }
            self.backend.write_map(&key, &notes)?;
        }

        migrated.insert(label, Utc::now());
        self.backend.write_map(MIGRATED_KEY, &migrated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(temp: &TempDir, account: Option<&str>) -> AnnotationStore {
        let backend = FileStore::new(temp.path().to_path_buf());
        if !backend.is_initialized() {
            backend.initialize().unwrap();
        }
        AnnotationStore::open(
            backend,
            account.map(str::to_string),
            Duration::milliseconds(86_400_000),
        )
        .unwrap()
    }

    fn observed(id: &str, name: Option<&str>, stars: Option<u64>) -> RepoObservation {
        let mut observation = RepoObservation::starred(id);
        observation.name = name.map(str::to_string);
        observation.stars = stars;
        observation
    }

    #[test]
    fn test_upsert_merges_partial_observations() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store.upsert_repo(&observed("42", Some("a/b"), Some(10))).unwrap();
        store.upsert_repo(&observed("42", None, Some(15))).unwrap();

        let record = store.get_repo("42").unwrap().unwrap();
        assert_eq!(record.name.as_deref(), Some("a/b"));
        assert_eq!(record.stars, Some(15));
    }

    #[test]
    fn test_upsert_is_idempotent_modulo_cached_at() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);
        let observation = observed("1", Some("a/b"), Some(3));

        let first = store.upsert_repo(&observation).unwrap();
        let mut second = store.upsert_repo(&observation).unwrap();
        second.cached_at = first.cached_at;

        assert_eq!(first, second);
    }

    #[test]
    fn test_get_repo_absent_is_none() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        assert_eq!(store.get_repo("missing").unwrap(), None);
    }

    #[test]
    fn test_tags_and_note_absent_read_empty() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        assert!(store.get_tags("42").unwrap().is_empty());
        assert_eq!(store.get_note("42").unwrap(), "");
    }

    #[test]
    fn test_set_tags_preserves_insertion_order() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        let tags = vec!["zeta".to_string(), "alpha".to_string(), "mid".to_string()];
        store.set_tags("42", &tags).unwrap();

        assert_eq!(store.get_tags("42").unwrap(), tags);
    }

    #[test]
    fn test_empty_tags_removes_storage_entry() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store.set_tags("42", &["x".to_string()]).unwrap();
        store.set_tags("42", &[]).unwrap();

        assert!(store.get_tags("42").unwrap().is_empty());
        // The entry is gone from the underlying document, not just empty.
        assert!(!store.tag_map().unwrap().contains_key("42"));
    }

    #[test]
    fn test_empty_note_removes_storage_entry() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store.set_note("42", "remember this").unwrap();
        store.set_note("42", "").unwrap();

        assert_eq!(store.get_note("42").unwrap(), "");
        let backend = FileStore::new(temp.path().to_path_buf());
        let notes: BTreeMap<String, String> = backend.read_map("notes.shared").unwrap();
        assert!(!notes.contains_key("42"));
    }

    #[test]
    fn test_unstar_then_star_round_trips_everything() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store.upsert_repo(&observed("42", Some("a/b"), Some(10))).unwrap();
        store
            .set_tags("42", &["x".to_string(), "y".to_string()])
            .unwrap();
        store.set_note("42", "keep an eye on this").unwrap();
        let before = store.get_repo("42").unwrap().unwrap();

        assert!(store.mark_unstarred("42").unwrap());
        assert_eq!(store.get_repo("42").unwrap(), None);
        assert!(store.get_tags("42").unwrap().is_empty());
        assert_eq!(store.get_note("42").unwrap(), "");
        assert!(store.is_pending("42").unwrap());

        assert!(store.mark_starred("42").unwrap());
        assert_eq!(store.get_repo("42").unwrap(), Some(before));
        assert_eq!(
            store.get_tags("42").unwrap(),
            vec!["x".to_string(), "y".to_string()]
        );
        assert_eq!(store.get_note("42").unwrap(), "keep an eye on this");
        assert!(!store.is_pending("42").unwrap());
    }

    #[test]
    fn test_mark_unstarred_without_record_is_noop() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        assert!(!store.mark_unstarred("missing").unwrap());
        assert!(!store.is_pending("missing").unwrap());
    }

    #[test]
    fn test_mark_starred_without_pending_is_noop() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store.upsert_repo(&observed("42", Some("a/b"), None)).unwrap();
        let before = store.get_repo("42").unwrap();

        assert!(!store.mark_starred("42").unwrap());
        assert_eq!(store.get_repo("42").unwrap(), before);
    }

    #[test]
    fn test_sweep_boundary_is_strictly_greater() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store.upsert_repo(&observed("42", None, None)).unwrap();
        store.mark_unstarred("42").unwrap();

        let backend = FileStore::new(temp.path().to_path_buf());
        let pending: BTreeMap<String, PendingEntry> = backend.read_map("pending").unwrap();
        let unstarred_at = pending.get("42").unwrap().unstarred_at;

        let kept = store
            .sweep_expired(unstarred_at + Duration::milliseconds(86_399_999))
            .unwrap();
        assert_eq!(kept, 0);
        assert!(store.is_pending("42").unwrap());

        let removed = store
            .sweep_expired(unstarred_at + Duration::milliseconds(86_400_001))
            .unwrap();
        assert_eq!(removed, 1);
        assert!(!store.is_pending("42").unwrap());

        // Expired for good: re-starring finds nothing.
        assert!(!store.mark_starred("42").unwrap());
    }

    #[test]
    fn test_merge_into_pending_never_resurrects_active_record() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store.upsert_repo(&observed("42", Some("a/b"), Some(10))).unwrap();
        store.set_tags("42", &["keep".to_string()]).unwrap();
        store.mark_unstarred("42").unwrap();

        assert!(store
            .merge_into_pending(&observed("42", None, Some(12)))
            .unwrap());

        // Still in exactly one place: the pending set.
        assert_eq!(store.get_repo("42").unwrap(), None);
        assert!(store.is_pending("42").unwrap());

        // Restoring reattaches the updated snapshot.
        assert!(store.mark_starred("42").unwrap());
        let record = store.get_repo("42").unwrap().unwrap();
        assert_eq!(record.name.as_deref(), Some("a/b"));
        assert_eq!(record.stars, Some(12));
        assert_eq!(store.get_tags("42").unwrap(), vec!["keep".to_string()]);
    }

    #[test]
    fn test_merge_into_pending_without_entry_is_noop() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        assert!(!store.merge_into_pending(&observed("42", None, None)).unwrap());
        assert!(!store.is_pending("42").unwrap());
        assert_eq!(store.get_repo("42").unwrap(), None);
    }

    #[test]
    fn test_all_unique_tags_sorted_case_insensitively() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp, None);

        store
            .set_tags("1", &["Zeta".to_string(), "alpha".to_string()])
            .unwrap();
        store
            .set_tags("2", &["beta".to_string(), "ALPHA".to_string()])
            .unwrap();

        assert_eq!(
            store.all_unique_tags().unwrap(),
            vec!["alpha".to_string(), "beta".to_string(), "Zeta".to_string()]
        );
    }

    #[test]
    fn test_account_namespaces_are_independent() {
        let temp = TempDir::new().unwrap();

        let alice = open_store(&temp, Some("alice"));
        alice.set_tags("42", &["work".to_string()]).unwrap();
        alice.set_note("42", "alice's note").unwrap();

        let bob = open_store(&temp, Some("bob"));
        assert!(bob.get_tags("42").unwrap().is_empty());
        assert_eq!(bob.get_note("42").unwrap(), "");

        // Metadata cache is global, annotations are not.
        bob.upsert_repo(&observed("42", Some("a/b"), None)).unwrap();
        assert!(alice.get_repo("42").unwrap().is_some());
    }

    #[test]
    fn test_shared_data_migrates_once_into_new_account() {
        let temp = TempDir::new().unwrap();

        let shared = open_store(&temp, None);
        shared.set_tags("1", &["legacy".to_string()]).unwrap();
        shared.set_tags("2", &["old".to_string()]).unwrap();
        shared.set_note("1", "from before login").unwrap();

        let account = open_store(&temp, Some("octocat"));
        assert_eq!(account.get_tags("1").unwrap(), vec!["legacy".to_string()]);
        assert_eq!(account.get_tags("2").unwrap(), vec!["old".to_string()]);
        assert_eq!(account.get_note("1").unwrap(), "from before login");

        // Shared data is copied, not moved.
        assert_eq!(shared.get_tags("1").unwrap(), vec!["legacy".to_string()]);

        // The migration never runs again for this account.
        account.set_tags("2", &["replaced".to_string()]).unwrap();
        let reopened = open_store(&temp, Some("octocat"));
        assert_eq!(reopened.get_tags("2").unwrap(), vec!["replaced".to_string()]);
    }

    #[test]
    fn test_migration_does_not_overwrite_account_data() {
        let temp = TempDir::new().unwrap();

        let account = open_store(&temp, Some("octocat"));
        account.set_tags("1", &["mine".to_string()]).unwrap();

        // Shared data appearing after the one-time migration already ran
        // must not clobber the account's entry.
        let shared = open_store(&temp, None);
        shared.set_tags("1", &["legacy".to_string()]).unwrap();

        let reopened = open_store(&temp, Some("octocat"));
        assert_eq!(reopened.get_tags("1").unwrap(), vec!["mine".to_string()]);
    }
}
