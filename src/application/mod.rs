//! Application layer - Use cases and orchestration

pub mod annotate;
pub mod init;
pub mod list_repos;
pub mod list_tags;
pub mod manage_config;
pub mod observe;
pub mod star;

pub use annotate::AnnotateService;
pub use list_repos::{ListReposService, RepoListing};
pub use list_tags::ListTagsService;
pub use manage_config::ConfigService;
pub use observe::{ObserveReport, ObserveService};
pub use star::StarService;
