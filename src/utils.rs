//! Utility functions for `srcbundle`.
//!
//! This module provides:
//! - Relative path computation against the project root
//! - Project name resolution for report headers
//! - Glob-based exclusion pattern parsing

use crate::classify::normalize_path;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Returns `path` relative to `root` in normalized `/` form, or `None` when
/// `path` does not live under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(normalize_path(&rel.to_string_lossy()))
}

/// Name written into report headers: the configured name, else the last
/// component of the root, else the root itself.
pub fn project_name(configured: Option<&str>, root: &Path) -> String {
    if let Some(name) = configured {
        return name.to_string();
    }
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Expands exclude patterns into common glob forms:
/// For example, "coverage" becomes:
///   - `**/coverage`
///   - `**/coverage/**`
///     unless the pattern already includes glob symbols or extensions.
pub fn expand_exclude_patterns(patterns: &[String]) -> Vec<String> {
    let mut expanded = Vec::new();

    for pat in patterns {
        let pat = pat.trim();
        if pat.is_empty() {
            continue;
        }
        if pat.contains('*') || pat.ends_with('/') || pat.contains('.') {
            expanded.push(pat.to_string());
        } else {
            expanded.push(format!("**/{}", pat));
            expanded.push(format!("**/{}/**", pat));
        }
    }

    expanded
}

/// Compiles a list of glob patterns into a `GlobSet` matcher,
/// which is tested against root-relative paths.
pub fn build_exclude_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build glob set")
}
