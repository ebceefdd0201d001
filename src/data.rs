//! Data structures shared by the scanner, the report writers and the audit
//! splitter.

use std::path::PathBuf;

/// A regular file discovered under the project root.
///
/// # Fields
/// * `abs_path` - Location on disk, used for reading
/// * `rel_path` - Normalized `/`-separated path relative to the root, used
///   for classification and in report banners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub abs_path: PathBuf,
    pub rel_path: String,
}

/// One data row of an audit table.
///
/// # Fields
/// * `line` - The original line, written back verbatim
/// * `path` - The file or module the row refers to, normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
    pub line: String,
    pub path: String,
}
