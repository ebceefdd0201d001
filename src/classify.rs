//! Path classification against the configured inclusion rules.
//!
//! All comparisons happen on normalized relative paths: backslashes become
//! forward slashes, a leading `./` and trailing `/` are dropped. Rules from
//! the configuration are normalized the same way once, when the
//! [`Classifier`] is built.

use crate::config::Config;
use std::collections::HashSet;
use std::path::Path;

/// Brings a relative path into the canonical `a/b/c` form.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut trimmed = unified.as_str();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.trim_end_matches('/').to_string()
}

/// True when `path` is `dir` itself or lies underneath it.
///
/// Both arguments must already be normalized. `src/ui` matches
/// `src/ui/panel.ts` but not `src/ui-extra/x.ts`.
pub fn matches_dir(path: &str, dir: &str) -> bool {
    if dir.is_empty() {
        return false;
    }
    match path.strip_prefix(dir) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Extension of a normalized path, without the dot.
pub fn extension_of(path: &str) -> Option<&str> {
    Path::new(path).extension().and_then(|e| e.to_str())
}

#[derive(Debug, Clone)]
struct CategoryRules {
    dirs: Vec<String>,
    files: HashSet<String>,
}

impl CategoryRules {
    fn owns_file(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    fn owns_dir_of(&self, path: &str) -> bool {
        self.dirs.iter().any(|d| matches_dir(path, d))
    }
}

/// Decides which files are selected and which category they belong to.
#[derive(Debug, Clone)]
pub struct Classifier {
    categories: Vec<CategoryRules>,
    include_files: HashSet<String>,
    include_dirs: HashSet<String>,
    include_exts: HashSet<String>,
}

impl Classifier {
    pub fn new(config: &Config) -> Self {
        let normalize_all = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| normalize_path(s))
                .filter(|s| !s.is_empty())
                .collect()
        };

        let categories = config
            .categories
            .iter()
            .map(|c| CategoryRules {
                dirs: normalize_all(&c.dirs),
                files: normalize_all(&c.files).into_iter().collect(),
            })
            .collect();

        Self {
            categories,
            include_files: normalize_all(&config.include_files).into_iter().collect(),
            include_dirs: normalize_all(&config.include_dirs).into_iter().collect(),
            include_exts: config
                .include_exts
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Number of configured categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    fn has_allowed_extension(&self, path: &str) -> bool {
        extension_of(path).is_some_and(|ext| self.include_exts.contains(ext))
    }

    /// Relevance for the single-report mode.
    ///
    /// Explicit include files always pass. Anything else needs its top-level
    /// directory in the include set and an allowed extension.
    pub fn is_relevant(&self, rel_path: &str) -> bool {
        let path = normalize_path(rel_path);
        if self.include_files.contains(&path) {
            return true;
        }
        match path.split_once('/') {
            Some((top, _)) => {
                self.include_dirs.contains(top) && self.has_allowed_extension(&path)
            }
            None => false,
        }
    }

    /// First category (in declared order) whose rules own `rel_path`.
    ///
    /// No extension check is applied; audit rows may name modules or
    /// directories rather than files.
    pub fn category_for(&self, rel_path: &str) -> Option<usize> {
        let path = normalize_path(rel_path);
        self.categories
            .iter()
            .position(|c| c.owns_file(&path) || c.owns_dir_of(&path))
    }

    /// Category of a source file in categorized mode.
    ///
    /// A directory-prefix match only counts for allowed extensions, while an
    /// explicit file entry always counts.
    pub fn source_category(&self, rel_path: &str) -> Option<usize> {
        let path = normalize_path(rel_path);
        let ext_ok = self.has_allowed_extension(&path);
        self.categories
            .iter()
            .position(|c| c.owns_file(&path) || (ext_ok && c.owns_dir_of(&path)))
    }
}
