//! Infrastructure layer - Persistence and environment access

pub mod annotations;
pub mod config;
pub mod store;
pub mod watcher;

pub use annotations::AnnotationStore;
pub use config::Config;
pub use store::{FileStore, StorageBackend};
pub use watcher::{poll_until, WatchOutcome};
