//! Run orchestration for `srcbundle`.
//!
//! [`run`] resolves the project root and configuration, then [`execute`]
//! performs the phases in order:
//!
//! 1. **Scan** - walk the tree ([`scan_project`])
//! 2. **Consolidate** - route selected files into one or more reports
//! 3. **Audit** - in categorized mode, split the audit report by category
//!
//! Each phase is timed and the counts are collected into [`RunStats`].

use crate::audit::split_audit_report;
use crate::classify::Classifier;
use crate::cli::{Args, Mode};
use crate::config::Config;
use crate::data::ProjectFile;
use crate::metrics::{OutputStats, PhaseTimer, RunStats};
use crate::output::{ReportWriter, create_report};
use crate::scan::{ScanFilter, scan_project};
use crate::utils::{build_exclude_matcher, expand_exclude_patterns, project_name};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One open report together with what it is reported as.
struct Destination<W: Write> {
    path: PathBuf,
    category: Option<String>,
    report: ReportWriter<W>,
}

/// Reads a selected file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Every file this tool writes, so none of them is consolidated again.
pub fn own_outputs(root: &Path, config: &Config) -> HashSet<PathBuf> {
    std::iter::once(config.output_file.clone())
        .chain(
            config
                .categories
                .iter()
                .flat_map(|c| [c.output_path(), c.audit_output_path()]),
        )
        .map(|p| root.join(p))
        .collect()
}

/// Appends each routed file to its destination.
///
/// A file that cannot be read is reported and recorded in `skipped`; it
/// never aborts the run. Write failures do.
fn write_routed<W: Write>(
    files: &[ProjectFile],
    destinations: &mut [Destination<W>],
    route: impl Fn(&str) -> Option<usize>,
    skipped: &mut Vec<String>,
) -> Result<()> {
    for file in files {
        let Some(idx) = route(&file.rel_path) else {
            continue;
        };
        let dest = &mut destinations[idx];

        match read_source(&file.abs_path) {
            Ok(content) => {
                println!("Adding: {} -> {}", file.rel_path, dest.path.display());
                dest.report
                    .write_section(&file.rel_path, &content)
                    .with_context(|| format!("Failed to write to {}", dest.path.display()))?;
            }
            Err(err) => {
                eprintln!("Error reading {}: {:#}", file.rel_path, err);
                skipped.push(file.rel_path.clone());
            }
        }
    }
    Ok(())
}

/// Flushes every destination and converts it into its statistics.
fn finish_all<W: Write>(destinations: Vec<Destination<W>>) -> Result<Vec<OutputStats>> {
    destinations
        .into_iter()
        .map(|dest| {
            let files = dest.report.files();
            let bytes = dest.report.bytes();
            dest.report
                .finish()
                .with_context(|| format!("Failed to flush {}", dest.path.display()))?;
            Ok(OutputStats {
                destination: dest.path,
                category: dest.category,
                files,
                bytes,
            })
        })
        .collect()
}

/// Writes every relevant file into the single aggregate report.
pub fn consolidate_single(
    root: &Path,
    config: &Config,
    files: &[ProjectFile],
    stats: &mut RunStats,
) -> Result<()> {
    let classifier = Classifier::new(config);
    let project = project_name(config.project_name.as_deref(), root);

    let mut destinations = vec![Destination {
        path: config.output_file.clone(),
        category: None,
        report: create_report(&root.join(&config.output_file), &project, root)?,
    }];

    write_routed(
        files,
        &mut destinations,
        |rel| classifier.is_relevant(rel).then_some(0),
        &mut stats.skipped,
    )?;

    stats.outputs.extend(finish_all(destinations)?);
    Ok(())
}

/// Writes every categorized file into its category's report.
///
/// All category reports are opened up front and held until the walk is
/// done; categories that receive no files still get a header-only report.
pub fn consolidate_categorized(
    root: &Path,
    config: &Config,
    files: &[ProjectFile],
    stats: &mut RunStats,
) -> Result<()> {
    let classifier = Classifier::new(config);
    let project = project_name(config.project_name.as_deref(), root);

    let mut destinations = Vec::with_capacity(config.categories.len());
    for category in &config.categories {
        let path = category.output_path();
        let report = create_report(&root.join(&path), &project, root)?;
        destinations.push(Destination {
            path,
            category: Some(category.name.clone()),
            report,
        });
    }

    write_routed(
        files,
        &mut destinations,
        |rel| classifier.source_category(rel),
        &mut stats.skipped,
    )?;

    stats.outputs.extend(finish_all(destinations)?);
    Ok(())
}

/// Runs all phases against an already resolved root and configuration.
pub fn execute(root: &Path, config: &Config, args: &Args) -> Result<RunStats> {
    let mut stats = RunStats::new(args.mode, root.to_path_buf());

    let timer = PhaseTimer::new("Scan");
    let filter = ScanFilter {
        dir_names: config.exclude_dirs.iter().cloned().collect(),
        globs: build_exclude_matcher(&expand_exclude_patterns(&args.exclude))?,
        skip_files: own_outputs(root, config),
    };
    let files = scan_project(root, &filter)?;
    stats.add_phase(timer.finish());

    let timer = PhaseTimer::new("Consolidate");
    match args.mode {
        Mode::Single => consolidate_single(root, config, &files, &mut stats)?,
        Mode::Categorized => consolidate_categorized(root, config, &files, &mut stats)?,
    }
    stats.add_phase(timer.finish());

    if args.mode == Mode::Categorized && !args.no_audit {
        let timer = PhaseTimer::new("Audit");
        let classifier = Classifier::new(config);
        stats.audit = split_audit_report(root, config, &classifier)?;
        stats.add_phase(timer.finish());
    }

    Ok(stats)
}

/// Resolves the project root and configuration from the CLI, then runs.
pub fn run(args: &Args) -> Result<RunStats> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Cannot access project root {}", args.path.display()))?;

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(output) = &args.output {
        config.output_file = output.clone();
        config.validate()?;
    }

    println!("Scanning {}...", root.display());
    execute(&root, &config, args)
}
