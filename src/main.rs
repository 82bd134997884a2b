use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::Path;

mod cli;
mod core;
mod generators;
mod history;
mod models;
mod utils;

use crate::cli::Args;
use crate::core::config::Config;
use crate::core::GenerationOrchestrator;
use crate::generators::{GeminiClient, PronounceableError, PronounceableSource};
use crate::history::{FileStorage, HistoryStorage, HistoryStore, MemoryStorage};

fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false)
        .target(env_logger::Target::Pipe(Box::new(
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)?,
        )))
        .init();

    Ok(())
}

fn pronounceable_source(config: &Config) -> Option<Box<dyn PronounceableSource>> {
    match GeminiClient::from_config(config) {
        Ok(client) => {
            log::info!("Pronounceable mode enabled (model {})", client.model());
            Some(Box::new(client))
        }
        Err(PronounceableError::NotConfigured) => {
            log::info!("No API key configured; pronounceable mode disabled");
            None
        }
        Err(e) => {
            log::error!("Failed to set up the generation service client: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let config = Config::load();
    init_logging(&config)?;

    log::info!("🔐 Starting PassQuartz");

    let storage: Box<dyn HistoryStorage> = if args.no_history {
        Box::new(MemoryStorage::new())
    } else {
        let path = args.history_file.clone().unwrap_or_else(|| config.history_file.clone());
        let storage = FileStorage::new(path);
        log::debug!("History slot: {}", storage.path().display());
        Box::new(storage)
    };

    let history = HistoryStore::load(storage);
    let mut orchestrator = GenerationOrchestrator::new(history, pronounceable_source(&config));

    let result = match args.command {
        Some(command) => cli::handlers::run_command(command, &mut orchestrator, &config).await,
        None => cli::menu::run_cli_menu(&mut orchestrator, &config).await,
    };

    if let Err(e) = &result {
        log::error!("{}", e);
    }
    log::info!("✅ PassQuartz shutdown complete.");

    result
}
