//! Tag and note editing use case

use crate::error::{Result, StarmarkError};
use crate::infrastructure::AnnotationStore;
use regex::Regex;
use std::sync::OnceLock;

fn label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap())
}

/// Service for editing a repository's tags and note.
///
/// Validation and duplicate prevention live here, at the command boundary;
/// the store itself accepts any strings.
pub struct AnnotateService {
    store: AnnotationStore,
}

impl AnnotateService {
    pub fn new(store: AnnotationStore) -> Self {
        AnnotateService { store }
    }

    pub fn tags(&self, id: &str) -> Result<Vec<String>> {
        self.store.get_tags(id)
    }

    /// Replace the tag sequence for a repository.
    ///
    /// Labels are validated and deduplicated case-insensitively, keeping the
    /// first occurrence so display order follows what the user typed.
    pub fn set_tags(&self, id: &str, labels: &[String]) -> Result<Vec<String>> {
        let mut tags: Vec<String> = Vec::new();
        for label in labels {
            if !label_regex().is_match(label) {
                return Err(StarmarkError::InvalidTag(label.clone()));
            }
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(label)) {
                tags.push(label.clone());
            }
        }

        self.store.set_tags(id, &tags)?;
        Ok(tags)
    }

    pub fn clear_tags(&self, id: &str) -> Result<()> {
        self.store.set_tags(id, &[])
    }

    pub fn note(&self, id: &str) -> Result<String> {
        self.store.get_note(id)
    }

    pub fn set_note(&self, id: &str, text: &str) -> Result<()> {
        self.store.set_note(id, text)
    }

    pub fn clear_note(&self, id: &str) -> Result<()> {
        self.store.set_note(id, "")
    }
}
