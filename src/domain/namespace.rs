//! Account namespaces for tag and note storage

use std::fmt;

/// Partition of tag/note storage keyed by the locally-authenticated account.
///
/// When no account identifier is available the store falls back to a single
/// shared namespace, so annotations still work on anonymous sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountNamespace {
    Shared,
    Account(String),
}

impl AccountNamespace {
    /// Resolve a namespace from an optional account identifier.
    ///
    /// Empty or whitespace-only identifiers fall back to the shared
    /// namespace.
    pub fn from_option(account: Option<&str>) -> Self {
        match account.map(str::trim) {
            Some(id) if !id.is_empty() => AccountNamespace::Account(id.to_string()),
            _ => AccountNamespace::Shared,
        }
    }

    /// Storage key for this namespace's tag map.
    pub fn tags_key(&self) -> String {
        format!("tags.{}", self.label_sanitized())
    }

    /// Storage key for this namespace's note map.
    pub fn notes_key(&self) -> String {
        format!("notes.{}", self.label_sanitized())
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, AccountNamespace::Shared)
    }

    /// Namespace label with any character unfit for a storage key replaced
    /// by '_'. Account identifiers come from the host page, not from us.
    pub fn label_sanitized(&self) -> String {
        match self {
            AccountNamespace::Shared => "shared".to_string(),
            AccountNamespace::Account(id) => id
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for AccountNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountNamespace::Shared => write!(f, "shared"),
            AccountNamespace::Account(id) => write!(f, "{}", id),
        }
    }
}
