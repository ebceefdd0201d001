//! Inclusion rules and category layout for a consolidation run.
//!
//! A [`Config`] is either the built-in default (the layout of a TypeScript
//! userscript project) or loaded from a JSON file whose shape mirrors the
//! structs below. Fields left out of the file fall back to the defaults,
//! except `categories` and `default_category`, which are taken as written.
//!
//! Categories are an ordered list: when a path satisfies more than one
//! category, the one declared first wins.

use crate::classify::normalize_path;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A named partition of output, defined by directory prefixes and
/// explicit file paths relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub dirs: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    /// Consolidated source destination; `code_<name>.txt` when unset
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Filtered audit destination; `audit_<name>.txt` when unset
    #[serde(default)]
    pub audit_output: Option<PathBuf>,
}

impl Category {
    pub fn new(name: &str, dirs: &[&str], files: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            dirs: dirs.iter().map(|d| d.to_string()).collect(),
            files: files.iter().map(|f| f.to_string()).collect(),
            output: None,
            audit_output: None,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("code_{}.txt", self.name)))
    }

    pub fn audit_output_path(&self) -> PathBuf {
        self.audit_output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("audit_{}.txt", self.name)))
    }
}

/// Full configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name printed in report headers; the root directory name when unset
    pub project_name: Option<String>,
    /// Allowed file extensions, with or without the leading dot
    pub include_exts: Vec<String>,
    /// Directory names pruned from the walk wherever they appear
    pub exclude_dirs: Vec<String>,
    /// Files always included in single mode, relative to the root
    pub include_files: Vec<String>,
    /// Top-level directories whose files are included in single mode
    pub include_dirs: Vec<String>,
    /// Aggregate report written in single mode
    pub output_file: PathBuf,
    /// Markdown audit report split in categorized mode
    pub audit_report: PathBuf,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Category receiving audit rows that match no other category
    #[serde(default)]
    pub default_category: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            project_name: None,
            include_exts: strings(&["ts", "js", "json", "html", "css", "md"]),
            exclude_dirs: strings(&[
                "node_modules",
                "dist",
                ".git",
                ".idea",
                ".vscode",
                "__pycache__",
            ]),
            include_files: strings(&[
                "package.json",
                "tsconfig.json",
                "vite.config.ts",
                "vitest.config.ts",
                "audit-report.md",
            ]),
            include_dirs: strings(&["src"]),
            output_file: PathBuf::from("all_code.txt"),
            audit_report: PathBuf::from("audit-report.md"),
            categories: vec![
                Category::new("ui", &["src/ui"], &[]),
                Category::new(
                    "logic",
                    &["src/core", "src/detection", "src/utils", "src/types"],
                    &["src/main.ts"],
                ),
                Category::new(
                    "config",
                    &[],
                    &[
                        "package.json",
                        "tsconfig.json",
                        "vite.config.ts",
                        "vitest.config.ts",
                    ],
                ),
                Category::new("tests", &["test"], &[]),
            ],
            default_category: Some("logic".to_string()),
        }
    }
}

impl Config {
    /// Loads a JSON configuration file and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the built-in configuration, or the one at `path` when given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Index of the fallback category for unmatched audit rows.
    pub fn default_category_index(&self) -> Option<usize> {
        let name = self.default_category.as_deref()?;
        self.categories.iter().position(|c| c.name == name)
    }

    /// Rejects configurations that would make routing ambiguous or make two
    /// reports overwrite each other.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                bail!("Category names must not be empty");
            }
            if !names.insert(category.name.as_str()) {
                bail!("Duplicate category name: '{}'", category.name);
            }
        }

        if let Some(default) = &self.default_category {
            if !names.contains(default.as_str()) {
                bail!("Default category '{}' is not a declared category", default);
            }
        }

        let mut destinations = HashSet::new();
        let all_outputs = std::iter::once(self.output_file.clone()).chain(
            self.categories
                .iter()
                .flat_map(|c| [c.output_path(), c.audit_output_path()]),
        );
        for dest in all_outputs {
            let key = normalize_path(&dest.to_string_lossy());
            if !destinations.insert(key) {
                bail!("Output destination {} is used more than once", dest.display());
            }
        }

        Ok(())
    }
}
