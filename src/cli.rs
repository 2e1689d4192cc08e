use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// filemap - resolve file mappings and task descriptors from a task file
#[derive(Parser, Debug)]
#[command(name = "filemap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print each task's resolved source -> target mapping
    Map {
        /// Task definition file (TOML)
        file: PathBuf,

        /// Only this task
        #[arg(short, long)]
        task: Option<String>,
    },

    /// Print task descriptors as JSON
    Tasks {
        /// Task definition file (TOML)
        file: PathBuf,

        /// Only this task
        #[arg(short, long)]
        task: Option<String>,
    },
}
