//! payfeed main entry point

mod cli;
mod commands;
mod formatting;

use anyhow::{anyhow, Result};
use clap::Parser;
use payfeed_config::{Config, ConfigError};
use std::path::Path;
use tokio::runtime::Runtime;

use crate::cli::{Cli, Command};
use crate::commands::Feed;

fn main() -> Result<()> {
    let args = Cli::parse();

    let command = match args.command {
        Command::InitConfig(cmd) => {
            init_logging("info");
            return cmd.run(&args.config);
        }
        command => command,
    };

    let (config, config_missing) = load_config(&args.config)?;
    init_logging(&config.logging.level);
    if config_missing {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }
    log::debug!("Snapshot slot: {}", config.snapshot_path().display());

    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut feed = Feed::open(config);
        match command {
            Command::List(cmd) => cmd.run(&mut feed).await,
            Command::Contacts(cmd) => cmd.run(&mut feed).await,
            Command::Show(cmd) => cmd.run(&mut feed).await,
            Command::Add(cmd) => cmd.run(&mut feed).await,
            Command::Edit(cmd) => cmd.run(&mut feed).await,
            Command::Remove(cmd) => cmd.run(&mut feed).await,
            // Handled before the store is opened
            Command::InitConfig(_) => Ok(()),
        }
    })
}

/// Load the config file; a missing file means defaults
fn load_config(path: &Path) -> Result<(Config, bool)> {
    match Config::load(path) {
        Ok(config) => Ok((config, false)),
        Err(ConfigError::FileNotFound { .. }) => Ok((Config::default(), true)),
        Err(e) => {
            let hint = e.suggestion().map(|s| format!("\n  - {}", s)).unwrap_or_default();
            Err(anyhow!("[{}] {}{}", e.code(), e, hint))
        }
    }
}

/// RUST_LOG wins over the configured level
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
