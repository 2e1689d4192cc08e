//! filemap CLI - inspect file mappers defined in a task file
//!
//! Usage: filemap <COMMAND>
//!
//! Commands:
//!   map    Print resolved source -> target mappings
//!   tasks  Print task descriptors as JSON

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    filemappers::logging::init(cli.verbose);

    match cli.command {
        Commands::Map { file, task } => commands::map::cmd_map(&file, task.as_deref(), cli.json),
        Commands::Tasks { file, task } => commands::tasks::cmd_tasks(&file, task.as_deref()),
    }
}
