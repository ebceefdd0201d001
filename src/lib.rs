//! Library crate for srcbundle
//!
//! This exposes the modules used by the binary and the integration tests.
//!
//! # Features
//!
//! - **Source Consolidation**: Concatenate selected project files into one
//!   banner-delimited text report, or one report per category
//! - **Path Classification**: Ordered category rules with directory-prefix
//!   and explicit-file matching
//! - **Audit Splitting**: Divide a markdown findings table into standalone
//!   per-category tables
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Categories and inclusion rules
//! - [`classify`]: Path normalization and classification
//! - [`scan`]: Project tree traversal
//! - [`output`]: Report writers and the terminal summary
//! - [`audit`]: Audit table parsing and categorization
//! - [`consolidate`]: Phase orchestration
//! - [`metrics`]: Phase timing and run statistics
//! - [`utils`]: Path helpers and exclusion pattern parsing

pub mod audit;
pub mod classify;
pub mod cli;
pub mod config;
pub mod consolidate;
pub mod data;
pub mod metrics;
pub mod output;
pub mod scan;
pub mod utils;

pub use cli::{Args, Mode};
pub use config::{Category, Config};
pub use consolidate::{execute, run};
pub use data::{AuditRow, ProjectFile};
