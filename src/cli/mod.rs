// src/cli/mod.rs
use clap::Parser;
use std::path::PathBuf;

pub mod commands;
pub mod menu;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Password generator with strength meter and recent history", long_about = None)]
pub struct Args {
    /// History file (overrides HISTORY_FILE)
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Keep history in memory only for this session
    #[arg(long, conflicts_with = "history_file")]
    pub no_history: bool,

    /// Command to execute (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}
