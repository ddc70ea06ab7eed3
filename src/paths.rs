use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn config_file_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("unable to resolve config directory")?;
    Ok(base.join("viewfeed").join("viewfeed.toml"))
}

pub fn cache_file_path() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("unable to resolve cache directory")?;
    Ok(base.join("viewfeed").join("viewing-activity.csv"))
}
