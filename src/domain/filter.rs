//! Session filter state for repository listings

use crate::domain::RepoRecord;

/// Filter selections for one listing session.
///
/// Owned by the listing use case rather than held as free module state, so a
/// caller always sees one coherent set of selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoFilter {
    /// Keep repositories carrying this tag (case-insensitive).
    pub tag: Option<String>,
    /// Keep repositories whose primary language equals this (case-insensitive).
    pub language: Option<String>,
    /// Keep repositories whose name or description contains this substring
    /// (case-insensitive).
    pub query: Option<String>,
}

impl RepoFilter {
    pub fn new(tag: Option<String>, language: Option<String>, query: Option<String>) -> Self {
        RepoFilter {
            tag,
            language,
            query,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.language.is_none() && self.query.is_none()
    }

    /// Whether a record (with its tags) passes every active selection.
    pub fn matches(&self, record: &RepoRecord, tags: &[String]) -> bool {
        if let Some(wanted) = &self.tag {
            let wanted = wanted.to_lowercase();
            if !tags.iter().any(|t| t.to_lowercase() == wanted) {
                return false;
            }
        }

        if let Some(language) = &self.language {
            match &record.language {
                Some(have) if have.eq_ignore_ascii_case(language) => {}
                _ => return false,
            }
        }

        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let in_name = record
                .name
                .as_deref()
                .map(|n| n.to_lowercase().contains(&query))
                .unwrap_or(false);
            let in_description = record
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&query))
                .unwrap_or(false);
            if !in_name && !in_description {
                return false;
            }
        }

        true
    }
}
