//! Where ledgerize keeps its config.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Overrides `~/.ledgerize` when set to a non-empty path.
pub const HOME_OVERRIDE: &str = "LEDGERIZE_HOME";

pub fn ledgerize_home() -> Result<PathBuf> {
    resolve_home(|key| std::env::var_os(key))
}

fn resolve_home(var: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    let set = |key: &str| var(key).filter(|v| !v.is_empty());
    if let Some(dir) = set(HOME_OVERRIDE) {
        return Ok(PathBuf::from(dir));
    }
    let home = set("HOME").with_context(|| format!("neither {HOME_OVERRIDE} nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".ledgerize"))
}

/// Create the home directory on first use and return it.
pub fn ensure_ledgerize_home() -> Result<PathBuf> {
    let dir = ledgerize_home()?;
    if !dir.is_dir() {
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "created ledgerize home");
    }
    Ok(dir)
}
