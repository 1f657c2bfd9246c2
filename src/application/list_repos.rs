//! List cached repositories use case

use crate::domain::{RepoFilter, RepoRecord};
use crate::error::Result;
use crate::infrastructure::AnnotationStore;

/// One row of a repository listing: the cached record with its tags.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoListing {
    pub record: RepoRecord,
    pub tags: Vec<String>,
}

/// Service for listing the cached repositories through a session filter.
///
/// Listings read the whole cache, so filtered views include repositories
/// that were observed on earlier visits, not just the current page.
pub struct ListReposService {
    store: AnnotationStore,
}

impl ListReposService {
    pub fn new(store: AnnotationStore) -> Self {
        ListReposService { store }
    }

    /// Execute a listing, sorted by slug (falling back to id) for stable
    /// display.
    pub fn execute(&self, filter: &RepoFilter) -> Result<Vec<RepoListing>> {
        let repos = self.store.all_repos()?;
        let tag_map = self.store.tag_map()?;

        let mut listings: Vec<RepoListing> = repos
            .into_values()
            .filter_map(|record| {
                let tags = tag_map.get(&record.id).cloned().unwrap_or_default();
                if filter.matches(&record, &tags) {
                    Some(RepoListing { record, tags })
                } else {
                    None
                }
            })
            .collect();

        listings.sort_by(|a, b| {
            let a_key = a.record.name.as_deref().unwrap_or(&a.record.id);
            let b_key = b.record.name.as_deref().unwrap_or(&b.record.id);
            a_key.to_lowercase().cmp(&b_key.to_lowercase())
        });

        Ok(listings)
    }
}
