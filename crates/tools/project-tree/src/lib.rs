//! Directory structure scanner for coding agents.
//!
//! [`scan`] walks a project root and returns a nested, serializable tree of
//! every retained file and directory. Exclusion is by literal name (see
//! [`LiteralNameIgnoreMatcher`]), and results can be cached in a
//! `project_structure.json` sidecar inside the root.
//!
//! ```no_run
//! use project_tree::{scan, ScanOptions};
//!
//! let outcome = scan("/path/to/project", &ScanOptions::default())?;
//! for warning in &outcome.warnings {
//!     eprintln!("{warning}");
//! }
//! println!("{}", project_tree::cache::to_pretty_json(&outcome.result)?);
//! # Ok::<(), project_tree::ScanError>(())
//! ```

pub mod cache;
pub mod error;
pub mod ignore_set;
pub mod paths;
pub mod types;
pub mod walker;

pub use error::{Result, ScanError};
pub use ignore_set::{BUILTIN_IGNORES, LiteralNameIgnoreMatcher};
pub use types::{ResultSource, ScanOptions, ScanOutcome, ScanResult, ScanWarning, TreeNode};

use std::path::Path;

/// Scan `root` and return its tree.
///
/// Steps:
/// 1) Resolve `root` (tilde, symlinks) and require a directory
/// 2) Unless `force_regenerate`, return the cache sidecar if it parses
/// 3) Build the ignore set (built-ins plus optional root `.gitignore`)
/// 4) Walk depth-first, directories before files
/// 5) If `write_result`, store the fresh tree in the sidecar
///
/// Only step 1 (and failing to list the root) can fail. Everything else
/// degrades to a [`ScanWarning`] in the outcome.
pub fn scan(root: impl AsRef<Path>, options: &ScanOptions) -> Result<ScanOutcome> {
    let root = paths::resolve_root(root)?;
    let cache_path = cache::cache_path(&root);
    let mut warnings = vec![];

    if !options.force_regenerate {
        match cache::load(&cache_path) {
            Ok(Some(result)) => {
                tracing::debug!("Using cached structure from {}", cache_path.display());
                return Ok(ScanOutcome {
                    result,
                    warnings,
                    source: ResultSource::Cache,
                    cache_path,
                });
            }
            Ok(None) => tracing::debug!("No cached structure at {}", cache_path.display()),
            Err(e) => warnings.push(ScanWarning::new(
                ScanWarning::CACHE_UNREADABLE,
                &cache_path,
                format!("Failed to load cached structure, regenerating: {e}"),
            )),
        }
    }

    let ignore = LiteralNameIgnoreMatcher::from_root(&root, options.follow_ignore_file, &mut warnings);
    tracing::debug!("Ignoring {} names under {}", ignore.len(), root.display());

    let cfg = walker::WalkConfig {
        root: &root,
        ignore: &ignore,
    };
    let result = ScanResult {
        root: walker::walk(&cfg, &mut warnings)?,
    };
    tracing::debug!(
        "Scanned {} entries under {}",
        result.iter().count(),
        root.display()
    );

    if options.write_result
        && let Err(e) = cache::store(&cache_path, &result)
    {
        warnings.push(ScanWarning::new(
            ScanWarning::CACHE_WRITE_FAILED,
            &cache_path,
            e.to_string(),
        ));
    }

    Ok(ScanOutcome {
        result,
        warnings,
        source: ResultSource::Walked,
        cache_path,
    })
}
