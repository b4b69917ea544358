pub mod cli;
pub mod config;
pub mod core;
pub mod import;
pub mod report;
pub mod senior;
pub mod sheet;

use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::import::ImportArgs;

/// Commands the application knows how to run.
pub enum AppCommand {
    Validate { sheet: PathBuf },
    Import(Box<ImportArgs>),
    Sample { path: PathBuf },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Budget importer starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Validate { sheet } => cli::validate::run(sheet),
        AppCommand::Import(args) => cli::import::run(&config, &args).await,
        AppCommand::Sample { path } => cli::sample::run(path),
    }
}
