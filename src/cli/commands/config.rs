//! Config command: show where settings live and what they resolve to.

use anyhow::Result;
use std::path::Path;
use urldl::config::{self, AppConfig};

pub fn run_config(explicit: Option<&Path>, cfg: &AppConfig) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
