use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::downloader::DEFAULT_BLOCK_SIZE;

/// Settings loaded from `~/.config/urldl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Block size used for progress reports, in bytes.
    pub block_size: u64,
    /// Optional TCP connect timeout in seconds (None = wait indefinitely).
    pub connect_timeout_secs: Option<u64>,
    /// Reset the progress indicator to 0 when a download fails instead of
    /// leaving it at the last reported value.
    pub reset_progress_on_failure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("urldl/{}", env!("CARGO_PKG_VERSION")),
            block_size: DEFAULT_BLOCK_SIZE,
            connect_timeout_secs: None,
            reset_progress_on_failure: false,
        }
    }
}

impl AppConfig {
    /// Block size with 0 treated as 1.
    pub fn effective_block_size(&self) -> u64 {
        self.block_size.max(1)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urldl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AppConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AppConfig::default();
        write_default(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: AppConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &AppConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml)?;
    Ok(())
}
