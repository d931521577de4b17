use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn overview_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".overview"))
}

/// `~/.overview/config.toml`, whether or not it exists.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(overview_home()?.join("config.toml"))
}
