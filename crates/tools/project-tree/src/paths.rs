//! Scan root resolution.

use crate::error::{Result, ScanError};
use std::path::{Path, PathBuf};

/// Resolve a scan root to its canonical absolute directory.
///
/// The path is taken literally (a directory named `~` is just that) and
/// symlinks are followed. Anything that does not end up at an existing
/// directory is reported as [`ScanError::NotADirectory`] carrying the path
/// as the caller gave it.
pub fn resolve_root(root: impl AsRef<Path>) -> Result<PathBuf> {
    let given = root.as_ref();
    let not_a_dir = || ScanError::NotADirectory {
        path: given.to_path_buf(),
    };
    let canonical = std::fs::canonicalize(given).map_err(|_| not_a_dir())?;
    if !canonical.is_dir() {
        return Err(not_a_dir());
    }
    Ok(canonical)
}
