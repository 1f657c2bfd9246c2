//! CLI layer - Command parsing and output

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
