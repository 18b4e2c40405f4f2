//! JSON cache sidecar stored next to the scanned tree.
//!
//! Writes go through the atomicwrites crate so the sidecar is either fully
//! written or left untouched. Freshness is never checked against the live
//! filesystem: a stale cache is returned as-is.

use crate::error::{Result, ScanError};
use crate::types::ScanResult;
use atomicwrites::{AllowOverwrite, AtomicFile};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Sidecar file name inside the scan root.
pub const CACHE_FILE_NAME: &str = "project_structure.json";

pub fn cache_path(root: &Path) -> PathBuf {
    root.join(CACHE_FILE_NAME)
}

/// Pretty JSON with two-space indentation, no trailing newline.
/// Non-ASCII characters are emitted as-is.
pub fn to_pretty_json(result: &ScanResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Load a cached result.
///
/// Returns `Ok(None)` when no cache file exists; read or parse failures are
/// errors so the caller can decide to regenerate.
///
/// The file is parsed into the typed tree, not passed through verbatim:
/// valid JSON of another shape (e.g. a file node without `extension`) is a
/// parse error, and keys the tree does not model are dropped.
pub fn load(path: &Path) -> Result<Option<ScanResult>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
}

/// Write `result` to `path` atomically, overwriting any existing file.
pub fn store(path: &Path, result: &ScanResult) -> Result<()> {
    let json = to_pretty_json(result)?;
    let af = AtomicFile::new(path, AllowOverwrite);
    af.write(|f| f.write_all(json.as_bytes()))
        .map_err(|e| ScanError::CacheWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}
