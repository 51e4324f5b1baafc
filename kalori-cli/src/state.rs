use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$KALORI_HOME`, or `~/.kalori`.
pub fn kalori_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("KALORI_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".kalori"))
}

pub fn ensure_kalori_home() -> Result<PathBuf> {
    let dir = kalori_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
