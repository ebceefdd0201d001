//! Report writers for the `srcbundle` application.
//!
//! # Available Writers
//!
//! - **Report**: concatenated source files, each behind a path banner
//! - **Audit**: one category's slice of the audit table
//! - **Summary**: completion summary printed to the terminal
//!
//! The file writers are generic over [`std::io::Write`] so they can be
//! exercised against in-memory buffers.

pub mod audit;
pub mod report;
pub mod summary;

/// Width of the banner under the report header.
pub const HEADER_BANNER_WIDTH: usize = 80;
/// Width of the banners around each `File:` line.
pub const SECTION_BANNER_WIDTH: usize = 20;
/// Width of the banner under an audit report title.
pub const AUDIT_BANNER_WIDTH: usize = 40;

/// A line of `=` of the given width.
pub fn banner(width: usize) -> String {
    "=".repeat(width)
}

pub use audit::write_category_audit;
pub use report::{ReportWriter, create_report};
pub use summary::{render as render_summary, write_summary};
