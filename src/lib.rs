//! starmark - Starred-repository annotation cache
//!
//! A command-line tool that caches metadata about starred repositories and
//! attaches user tags and notes to them, with a soft-delete grace window for
//! repositories that get unstarred.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::StarmarkError;
