//! Project tree traversal for `srcbundle`.
//!
//! [`scan_project`] walks the root with `WalkDir`, pruning excluded
//! directories and glob matches, and returns every regular file in
//! deterministic order: within each directory, files come first in lexical
//! order, then each subdirectory in lexical order. A spinner from `indicatif` shows progress while walking.

use crate::data::ProjectFile;
use crate::utils::relative_path;
use anyhow::{Context, Result};
use globset::GlobSet;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::{DirEntry, WalkDir};

/// Rules that keep paths out of the walk.
///
/// # Fields
/// * `dir_names` - Directory names pruned wherever they appear
/// * `globs` - Patterns matched against root-relative paths
/// * `skip_files` - Absolute paths never returned, such as the tool's own
///   report files
#[derive(Debug, Clone)]
pub struct ScanFilter {
    pub dir_names: HashSet<String>,
    pub globs: GlobSet,
    pub skip_files: HashSet<PathBuf>,
}

impl ScanFilter {
    fn prunes(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        if entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.dir_names.contains(name))
        {
            return true;
        }
        match relative_path(root, entry.path()) {
            Some(rel) => self.globs.is_match(&rel),
            None => false,
        }
    }
}

/// Recursively collects the regular files under `root`.
///
/// Unreadable directory entries are reported on stderr and skipped; the walk
/// itself never aborts on them.
///
/// # Errors
/// Returns an error if the progress template cannot be configured.
pub fn scan_project(root: &Path, filter: &ScanFilter) -> Result<Vec<ProjectFile>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner} Scanning files... [{elapsed}]")
            .context("Failed to set progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(|e| !filter.prunes(root, e));

    for entry in walker {
        pb.tick();
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                pb.suspend(|| eprintln!("Warning: skipping unreadable entry: {}", err));
                continue;
            }
        };
        if !entry.file_type().is_file() || filter.skip_files.contains(entry.path()) {
            continue;
        }
        if let Some(rel_path) = relative_path(root, entry.path()) {
            files.push(ProjectFile {
                abs_path: entry.path().to_path_buf(),
                rel_path,
            });
        }
    }

    pb.finish_and_clear();
    Ok(files)
}
