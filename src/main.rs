//! Main entry point for the `srcbundle` CLI application.
//!
//! `srcbundle` gathers the source files of a project into plain-text bundles
//! that are easy to hand to a reviewer, and splits a markdown audit report
//! into one table per area of the code base.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Delegates scanning, consolidation and audit splitting to
//!   [`srcbundle::run`]
//! - Prints the completion summary, the optional timing profile and the
//!   optional JSON statistics
//!
//! # Output Modes
//! - `--mode single`: everything in `all_code.txt`
//! - `--mode categorized`: `code_<category>.txt` plus `audit_<category>.txt`

use anyhow::Result;
use clap::Parser;
use srcbundle::Args;
use srcbundle::metrics::{print_profile_summary, save_stats_json};
use srcbundle::output::render_summary;

fn main() -> Result<()> {
    let args = Args::parse();

    let stats = srcbundle::run(&args)?;
    render_summary(&stats)?;

    if args.profile {
        print_profile_summary(&stats);
    }

    if let Some(path) = &args.stats_json {
        save_stats_json(&stats, path)?;
        println!("Statistics saved to: {}", path.display());
    }

    Ok(())
}
