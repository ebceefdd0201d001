//! CLI interface definitions for the `srcbundle` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`Mode`]: whether to write one aggregate report or one per category
//!
//! Every option has a default, so running `srcbundle` with no arguments
//! consolidates the current directory with the built-in configuration.
//!
//! # Example
//!
//! ```bash
//! srcbundle --mode categorized --config bundle.json --exclude coverage
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for `srcbundle`.
#[derive(Parser, Debug, Clone)]
#[command(name = "srcbundle", author = "Sam Green", version, about)]
pub struct Args {
    /// Project root to consolidate (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Write a single aggregate report or one report per category
    #[arg(long, value_enum, default_value_t = Mode::Single)]
    pub mode: Mode,

    /// JSON file describing categories and inclusion rules
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the aggregate output file (single mode only)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Additional glob patterns to exclude (e.g., 'coverage', '*.min.js')
    #[arg(long, value_name = "PATTERN", num_args = 1.., action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Skip splitting the audit report (categorized mode only)
    #[arg(long, default_value_t = false)]
    pub no_audit: bool,

    /// Show a timing summary for each phase
    #[arg(long, default_value_t = false)]
    pub profile: bool,

    /// Write a JSON summary of the run to FILE
    #[arg(long, value_name = "FILE")]
    pub stats_json: Option<PathBuf>,
}

/// Which report layout to produce.
///
/// # Variants
/// * `Single` - Every selected file goes into one aggregate report
/// * `Categorized` - Files are routed to per-category reports and the audit
///   table is split by category
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Single,
    Categorized,
}
