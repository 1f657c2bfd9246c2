//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "starmark")]
#[command(about = "Starred-repository annotation cache", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Account namespace override for this invocation
    #[arg(long, global = true, value_name = "NAME")]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new star cache
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Ingest repository observations (JSON from stdin or a file)
    Observe {
        /// Read observations from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Poll the file until it first yields observations or the timeout
        /// passes (requires --file)
        #[arg(short, long, requires = "file")]
        watch: bool,

        /// Watch timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,

        /// Watch poll interval in milliseconds
        #[arg(long, default_value = "500")]
        interval: u64,
    },

    /// Show the cached record, tags and note for one repository
    Show {
        /// Repository identifier
        id: String,
    },

    /// List cached repositories
    List {
        /// Keep repositories carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Keep repositories with this primary language
        #[arg(short, long)]
        lang: Option<String>,

        /// Keep repositories whose name or description contains this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// View or replace a repository's tags
    Tag {
        /// Repository identifier
        id: String,

        /// New tag sequence (omit to print current tags)
        labels: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "labels")]
        clear: bool,
    },

    /// View or replace a repository's note
    Note {
        /// Repository identifier
        id: String,

        /// New note text (omit to print the current note)
        text: Option<String>,

        /// Remove the note
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },

    /// List all tags in the current account namespace
    Tags,

    /// Record a successful star (restores pending data)
    Star {
        /// Repository identifier
        id: String,
    },

    /// Record a successful unstar (starts the grace period)
    Unstar {
        /// Repository identifier
        id: String,
    },

    /// Discard pending entries past the grace period
    Sweep,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
