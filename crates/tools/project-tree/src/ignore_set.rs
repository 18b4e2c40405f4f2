//! Literal-name exclusion for the directory walk.
//!
//! This is deliberately NOT a gitignore implementation: every entry is a
//! literal file name compared for exact equality against entry names at any
//! depth. Globs, negation, anchoring and trailing-slash directory markers are
//! not interpreted (`build/` only excludes an entry literally named
//! `build/`, which cannot exist). Only the `.gitignore` directly inside the
//! scan root is consulted.

use crate::types::ScanWarning;
use std::collections::BTreeSet;
use std::path::Path;

/// Names excluded from every scan.
pub const BUILTIN_IGNORES: &[&str] = &["__pycache__", ".DS_Store", ".git"];

/// Ignore file name looked up in the scan root.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralNameIgnoreMatcher {
    names: BTreeSet<String>,
}

impl Default for LiteralNameIgnoreMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LiteralNameIgnoreMatcher {
    /// Matcher containing only [`BUILTIN_IGNORES`].
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_IGNORES.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Built-in names plus `entries`.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matcher = Self::builtin();
        matcher.names.extend(entries.into_iter().map(Into::into));
        matcher
    }

    /// Extract entries from ignore-file text: each line trimmed, blank lines
    /// and `#` comments dropped, everything else kept verbatim.
    pub fn parse_ignore_lines(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    /// Build the matcher for a scan of `root`.
    ///
    /// When `follow_ignore_file` is set and `<root>/.gitignore` is a file, its
    /// entries are added. An unreadable ignore file is reported as a warning
    /// and the built-in names are used alone.
    pub fn from_root(root: &Path, follow_ignore_file: bool, warnings: &mut Vec<ScanWarning>) -> Self {
        if !follow_ignore_file {
            return Self::builtin();
        }
        let ignore_path = root.join(IGNORE_FILE_NAME);
        if !ignore_path.is_file() {
            return Self::builtin();
        }
        match std::fs::read_to_string(&ignore_path) {
            Ok(content) => Self::with_entries(Self::parse_ignore_lines(&content)),
            Err(e) => {
                warnings.push(ScanWarning::new(
                    ScanWarning::IGNORE_FILE_UNREADABLE,
                    &ignore_path,
                    format!("Failed to read ignore file: {e}"),
                ));
                Self::builtin()
            }
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
