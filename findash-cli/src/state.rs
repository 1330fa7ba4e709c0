use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$FINDASH_HOME`, else `~/.findash`.
pub fn findash_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("FINDASH_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".findash"))
}

pub fn ensure_findash_home() -> Result<PathBuf> {
    let dir = findash_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_data_path() -> Result<PathBuf> {
    Ok(findash_home()?.join("balance_data.csv"))
}
