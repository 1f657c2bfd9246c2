//! List tags use case

use crate::error::Result;
use crate::infrastructure::AnnotationStore;

/// Service for listing the unique tags in the current account namespace,
/// as used to build filter menus.
pub struct ListTagsService {
    store: AnnotationStore,
}

impl ListTagsService {
    pub fn new(store: AnnotationStore) -> Self {
        ListTagsService { store }
    }

    pub fn execute(&self) -> Result<Vec<String>> {
        self.store.all_unique_tags()
    }
}
