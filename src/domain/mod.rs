//! Domain layer - Business logic and domain models

pub mod filter;
pub mod namespace;
pub mod pending;
pub mod record;

pub use filter::RepoFilter;
pub use namespace::AccountNamespace;
pub use pending::PendingEntry;
pub use record::{RepoObservation, RepoRecord};
