//! CLI argument parsing for keystore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::Backend;

#[derive(Parser, Debug)]
#[command(name = "ks")]
#[command(author, version, about = "Inspect and edit a trip planner key-value store", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Store directory (overrides config)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all keys
    List,

    /// Print the JSON value stored at a key
    Get {
        #[arg(required = true)]
        key: String,
    },

    /// Store a JSON value at a key
    Set {
        #[arg(required = true)]
        key: String,

        /// JSON text (validated before writing)
        #[arg(required = true)]
        value: String,
    },

    /// Delete a key
    Delete {
        #[arg(required = true)]
        key: String,
    },
}
