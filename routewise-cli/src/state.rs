use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.routewise`, or `$ROUTEWISE_HOME` when set.
pub fn routewise_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ROUTEWISE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".routewise"))
}

pub fn ensure_routewise_home() -> Result<PathBuf> {
    let dir = routewise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
