//! Command-line path conveniences.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expand a leading tilde (~) in a command-line root to the home directory.
///
/// Supports:
/// - "~"  => <home>
/// - "~/" => <home>/(rest)
///
/// Does NOT support "~username". Shells usually expand these already; this
/// covers forms they leave alone, like `--root=~/proj`.
pub fn expand_tilde(p: &Path) -> Result<PathBuf> {
    let Some(s) = p.to_str() else {
        return Ok(p.to_path_buf());
    };
    if s == "~" {
        return resolve_home_dir().context("Could not determine home directory");
    }
    if let Some(stripped) = s.strip_prefix("~/") {
        let home = resolve_home_dir().context("Could not determine home directory")?;
        return Ok(home.join(stripped));
    }
    Ok(p.to_path_buf())
}

// Test hook: __PROJECT_TREE_HOME_FOR_TESTS=<path> overrides home.
fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(override_home) = std::env::var("__PROJECT_TREE_HOME_FOR_TESTS") {
        return Some(PathBuf::from(override_home));
    }
    dirs::home_dir()
}
