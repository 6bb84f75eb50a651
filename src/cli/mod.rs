//! CLI for urldl.

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urldl::config;
use urldl::manager::DownloadManager;

use commands::{run_config, run_get, run_shell};

#[derive(Debug, Parser)]
#[command(name = "urldl")]
#[command(about = "Download a single file from a URL with a progress bar", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/urldl/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download one URL.
    Get {
        /// URL to download; a `mediaurl` query parameter is followed.
        url: String,

        /// Where to save. Without an extension, the URL's one is appended.
        /// Defaults to the URL's file name in the current directory.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Prompt for URL and save location repeatedly until an empty URL.
    Shell,

    /// Show the config file location and the effective settings.
    Config,
}

/// Parses arguments and runs the command. `Ok(false)` means a download failed.
pub async fn run_from_args() -> Result<bool> {
    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);

    match cli.command {
        CliCommand::Get { url, output } => {
            let manager = DownloadManager::new(&cfg)?;
            run_get(&manager, &url, output.as_deref()).await
        }
        CliCommand::Shell => {
            let manager = DownloadManager::new(&cfg)?;
            run_shell(&manager).await?;
            Ok(true)
        }
        CliCommand::Config => {
            run_config(cli.config.as_deref(), &cfg)?;
            Ok(true)
        }
    }
}
