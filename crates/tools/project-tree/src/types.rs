//! Serializable tree model and scan configuration.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// One retained filesystem entry.
///
/// The JSON shape is `{"path": ..., "type": "dir", "children": [...]}` or
/// `{"path": ..., "type": "file", "extension": ...}`, keys in that order.
/// Reading accepts any key order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Dir {
        /// POSIX path relative to the scan root
        path: String,
        children: Vec<TreeNode>,
    },
    File {
        /// POSIX path relative to the scan root
        path: String,
        /// Suffix including the leading dot, or empty
        extension: String,
    },
}

// Hand-written so `path` precedes `type`; the derived internally tagged
// form always writes the tag first.
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        match self {
            Self::Dir { path, children } => {
                map.serialize_entry("path", path)?;
                map.serialize_entry("type", "dir")?;
                map.serialize_entry("children", children)?;
            }
            Self::File { path, extension } => {
                map.serialize_entry("path", path)?;
                map.serialize_entry("type", "file")?;
                map.serialize_entry("extension", extension)?;
            }
        }
        map.end()
    }
}

impl TreeNode {
    pub fn path(&self) -> &str {
        match self {
            Self::Dir { path, .. } | Self::File { path, .. } => path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir { .. })
    }

    /// Final path component.
    pub fn name(&self) -> &str {
        let path = self.path();
        path.rsplit('/').next().unwrap_or(path)
    }

    pub fn children(&self) -> Option<&[TreeNode]> {
        match self {
            Self::Dir { children, .. } => Some(children),
            Self::File { .. } => None,
        }
    }
}

/// Top-level wrapper: `{"root": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub root: Vec<TreeNode>,
}

impl ScanResult {
    /// Depth-first iterator over every node in the tree.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack: Vec<&TreeNode> = self.root.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev());
            }
            Some(node)
        })
    }
}

/// Knobs for a single scan. All default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Read `<root>/.gitignore` and add its lines to the ignore set
    pub follow_ignore_file: bool,
    /// Walk the filesystem even if a cache sidecar exists
    pub force_regenerate: bool,
    /// Write the fresh result to the cache sidecar
    pub write_result: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_ignore_file: true,
            force_regenerate: true,
            write_result: true,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_ignore_file(mut self, yes: bool) -> Self {
        self.follow_ignore_file = yes;
        self
    }

    pub fn force_regenerate(mut self, yes: bool) -> Self {
        self.force_regenerate = yes;
        self
    }

    pub fn write_result(mut self, yes: bool) -> Self {
        self.write_result = yes;
        self
    }
}

/// A recoverable problem encountered during a scan.
///
/// Scans never fail on these; they are collected and returned so callers
/// can display or assert on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Filesystem path the warning is about.
    pub path: PathBuf,

    /// Human-readable warning message.
    pub message: String,
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path.display(), self.message)
    }
}

impl ScanWarning {
    pub const IGNORE_FILE_UNREADABLE: &'static str = "ignore_file.unreadable";
    pub const CACHE_UNREADABLE: &'static str = "cache.unreadable";
    pub const CACHE_WRITE_FAILED: &'static str = "cache.write_failed";
    pub const READ_DIR_FAILED: &'static str = "walk.read_dir_failed";
    pub const SYMLINK_CYCLE: &'static str = "walk.symlink_cycle";

    pub(crate) fn new(code: &'static str, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        let warning = Self {
            code,
            path: path.into(),
            message: message.into(),
        };
        tracing::warn!("{}", warning);
        warning
    }
}

/// Where a scan result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// Built by walking the filesystem
    Walked,
    /// Loaded verbatim from the cache sidecar
    Cache,
}

/// Everything a successful scan produces.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub result: ScanResult,
    pub warnings: Vec<ScanWarning>,
    pub source: ResultSource,
    /// Location of the cache sidecar for this root
    pub cache_path: PathBuf,
}
