//! Recursive directory walk producing [`TreeNode`]s.

use crate::error::{Result, ScanError};
use crate::ignore_set::LiteralNameIgnoreMatcher;
use crate::types::{ScanWarning, TreeNode};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Files with this extension are always dropped, independent of the ignore set.
const ALWAYS_SKIPPED_EXTENSION: &str = ".pyc";

/// Inputs shared by every level of the walk.
#[derive(Debug)]
pub struct WalkConfig<'a> {
    /// Canonical scan root; every emitted path is relative to it
    pub root: &'a Path,
    pub ignore: &'a LiteralNameIgnoreMatcher,
}

struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Walk `cfg.root` and return its top-level nodes.
///
/// Failing to list the root is fatal; failing to list any subdirectory is
/// reported in `warnings` and that directory is emitted with no children.
pub fn walk(cfg: &WalkConfig<'_>, warnings: &mut Vec<ScanWarning>) -> Result<Vec<TreeNode>> {
    let entries = list_sorted(cfg.root).map_err(|source| ScanError::ReadRoot {
        path: cfg.root.to_path_buf(),
        source,
    })?;
    let mut ancestors = vec![cfg.root.to_path_buf()];
    Ok(build_level(cfg, entries, "", &mut ancestors, warnings))
}

fn build_level(
    cfg: &WalkConfig<'_>,
    entries: Vec<Entry>,
    rel_prefix: &str,
    ancestors: &mut Vec<PathBuf>,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<TreeNode> {
    let mut items = Vec::with_capacity(entries.len());

    for entry in entries {
        if cfg.ignore.is_ignored(&entry.name) {
            continue;
        }

        let rel_path = if rel_prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{rel_prefix}/{}", entry.name)
        };

        if entry.is_dir {
            let children = walk_subdir(cfg, &entry.path, &rel_path, ancestors, warnings);
            items.push(TreeNode::Dir {
                path: rel_path,
                children,
            });
        } else {
            let extension = suffix(&entry.name);
            if extension == ALWAYS_SKIPPED_EXTENSION {
                continue;
            }
            items.push(TreeNode::File {
                path: rel_path,
                extension: extension.to_string(),
            });
        }
    }

    items
}

fn walk_subdir(
    cfg: &WalkConfig<'_>,
    dir: &Path,
    rel_path: &str,
    ancestors: &mut Vec<PathBuf>,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<TreeNode> {
    // Directories are classified by following symlinks, so a link back up
    // the tree would recurse forever without this check.
    let canonical = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    if ancestors.contains(&canonical) {
        warnings.push(ScanWarning::new(
            ScanWarning::SYMLINK_CYCLE,
            dir,
            format!("Symlink cycle back to {}; not descending", canonical.display()),
        ));
        return vec![];
    }

    let entries = match list_sorted(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(ScanWarning::new(
                ScanWarning::READ_DIR_FAILED,
                dir,
                format!("Failed to list directory: {e}"),
            ));
            return vec![];
        }
    };

    ancestors.push(canonical);
    let children = build_level(cfg, entries, rel_path, ancestors, warnings);
    ancestors.pop();
    children
}

/// List the direct children of `dir`: directories first, then by
/// case-insensitive name, with exact name as the tie-breaker.
fn list_sorted(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for dent in fs::read_dir(dir)? {
        let dent = dent?;
        let path = dent.path();
        entries.push(Entry {
            name: dent.file_name().to_string_lossy().into_owned(),
            // Follows symlinks; broken links count as files
            is_dir: path.is_dir(),
            path,
        });
    }
    entries.sort_by(compare_entries);
    Ok(entries)
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

/// Final suffix of a file name including the dot.
///
/// `archive.tar.gz` -> `.gz`; `notes`, `.bashrc` and `file.` -> empty.
pub fn suffix(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(root: &Path, ignore: &LiteralNameIgnoreMatcher) -> (Vec<TreeNode>, Vec<ScanWarning>) {
        let mut warnings = vec![];
        let cfg = WalkConfig { root, ignore };
        let nodes = walk(&cfg, &mut warnings).unwrap();
        (nodes, warnings)
    }

    fn is_empty_dir(node: &TreeNode) -> bool {
        node.children().is_some_and(|c| c.is_empty())
    }

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(TreeNode::name).collect()
    }

    #[test]
    fn suffix_rules() {
        assert_eq!(suffix("main.py"), ".py");
        assert_eq!(suffix("archive.tar.gz"), ".gz");
        assert_eq!(suffix("notes"), "");
        assert_eq!(suffix(".bashrc"), "");
        assert_eq!(suffix("file."), "");
        assert_eq!(suffix("..hidden"), ".hidden");
        assert_eq!(suffix(".config.toml"), ".toml");
    }

    #[test]
    fn dirs_first_then_case_insensitive() {
        let td = TempDir::new().unwrap();
        let root = td.path();
        for f in ["b.txt", "A.txt", "c.txt"] {
            fs::write(root.join(f), "").unwrap();
        }
        for d in ["zeta", "Alpha"] {
            fs::create_dir_all(root.join(d)).unwrap();
        }
        let (nodes, _) = run(root, &LiteralNameIgnoreMatcher::builtin());
        assert_eq!(names(&nodes), vec!["Alpha", "zeta", "A.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn nested_paths_are_relative_posix() {
        let td = TempDir::new().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/c.rs"), "").unwrap();
        let (nodes, _) = run(root, &LiteralNameIgnoreMatcher::builtin());
        let TreeNode::Dir { path, children } = &nodes[0] else {
            panic!("expected dir");
        };
        assert_eq!(path, "a");
        assert_eq!(children[0].path(), "a/b");
        assert_eq!(children[0].children().unwrap()[0].path(), "a/b/c.rs");
    }

    #[test]
    fn ignored_names_prune_at_any_depth() {
        let td = TempDir::new().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("pkg/__pycache__")).unwrap();
        fs::write(root.join("pkg/__pycache__/mod.cpython-312.pyc"), "").unwrap();
        fs::write(root.join("pkg/.DS_Store"), "").unwrap();
        fs::write(root.join("pkg/mod.py"), "").unwrap();
        let (nodes, _) = run(root, &LiteralNameIgnoreMatcher::builtin());
        let children = nodes[0].children().unwrap();
        assert_eq!(names(children), vec!["mod.py"]);
    }

    #[test]
    fn pyc_files_skipped_but_pyc_named_dirs_kept() {
        let td = TempDir::new().unwrap();
        let root = td.path();
        fs::write(root.join("stale.pyc"), "").unwrap();
        fs::create_dir_all(root.join("weird.pyc")).unwrap();
        let (nodes, _) = run(root, &LiteralNameIgnoreMatcher::with_entries(Vec::<String>::new()));
        assert_eq!(names(&nodes), vec!["weird.pyc"]);
        assert!(nodes[0].is_dir());
    }

    #[test]
    fn empty_dir_has_empty_children() {
        let td = TempDir::new().unwrap();
        fs::create_dir_all(td.path().join("empty")).unwrap();
        let (nodes, _) = run(td.path(), &LiteralNameIgnoreMatcher::builtin());
        assert!(is_empty_dir(&nodes[0]));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_is_cut_with_warning() {
        let td = TempDir::new().unwrap();
        let root = td.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        std::os::unix::fs::symlink(&root, root.join("sub/loop")).unwrap();
        let (nodes, warnings) = run(&root, &LiteralNameIgnoreMatcher::builtin());
        let sub = nodes[0].children().unwrap();
        assert_eq!(sub[0].path(), "sub/loop");
        assert!(is_empty_dir(&sub[0]));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, ScanWarning::SYMLINK_CYCLE);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdir_warns_and_continues() {
        use std::os::unix::fs::PermissionsExt;

        let td = TempDir::new().unwrap();
        let root = td.path();
        let locked = root.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("secret"), "").unwrap();
        fs::write(root.join("open.txt"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root can read anything; nothing to assert in that case
        let readable = fs::read_dir(&locked).is_ok();
        let (nodes, warnings) = run(root, &LiteralNameIgnoreMatcher::builtin());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(names(&nodes), vec!["locked", "open.txt"]);
        if !readable {
            assert!(is_empty_dir(&nodes[0]));
            assert_eq!(warnings[0].code, ScanWarning::READ_DIR_FAILED);
        }
    }
}
