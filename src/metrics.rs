//! Run statistics and profiling utilities for `srcbundle`.
//!
//! This module provides:
//! - [`PhaseTimer`] - A wrapper around `Instant` for timing different phases
//! - [`RunStats`] - Per-output counts, skipped files and audit results
//! - [`print_profile_summary`] - Terminal output for phase timings
//! - [`save_stats_json`] - JSON output for scripting integration
//!
//! # Usage
//!
//! ```rust
//! use srcbundle::cli::Mode;
//! use srcbundle::metrics::{PhaseTimer, RunStats};
//! use std::path::PathBuf;
//!
//! let mut stats = RunStats::new(Mode::Single, PathBuf::from("."));
//! let timer = PhaseTimer::new("Scan");
//!
//! // ... do work ...
//!
//! stats.add_phase(timer.finish());
//! ```

use crate::cli::Mode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A timer for measuring the duration of a specific phase.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    /// The name of the phase being timed
    pub name: String,
    /// The start time of the phase
    pub start: Instant,
}

impl PhaseTimer {
    /// Creates a new timer and starts timing the specified phase.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Finishes timing the phase and returns the elapsed duration.
    pub fn finish(self) -> PhaseResult {
        PhaseResult {
            name: self.name,
            duration: self.start.elapsed(),
        }
    }
}

/// The result of a completed phase timing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub name: String,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// Durations are stored as whole milliseconds in JSON
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Counts for one consolidated source report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputStats {
    pub destination: PathBuf,
    /// Owning category; `None` for the single-mode aggregate
    pub category: Option<String>,
    pub files: usize,
    pub bytes: u64,
}

/// Rows routed into one category's audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditCategoryStats {
    pub category: String,
    pub destination: PathBuf,
    pub rows: usize,
}

/// Outcome of splitting the audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStats {
    pub source: PathBuf,
    /// Rows that matched a category by its own rules
    pub matched: usize,
    /// Rows routed to the default category for lack of a match
    pub defaulted: usize,
    /// Rows matching nothing while no default category is configured
    pub unassigned: usize,
    pub categories: Vec<AuditCategoryStats>,
}

impl AuditStats {
    /// Well-formed data rows seen in the source table.
    pub fn total_rows(&self) -> usize {
        self.matched + self.defaulted + self.unassigned
    }
}

/// Everything reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub mode: Mode,
    pub root: PathBuf,
    pub outputs: Vec<OutputStats>,
    /// Selected files that could not be read
    pub skipped: Vec<String>,
    /// `None` when the audit step did not run
    pub audit: Option<AuditStats>,
    pub phases: Vec<PhaseResult>,
}

impl RunStats {
    pub fn new(mode: Mode, root: PathBuf) -> Self {
        Self {
            mode,
            root,
            outputs: Vec::new(),
            skipped: Vec::new(),
            audit: None,
            phases: Vec::new(),
        }
    }

    pub fn add_phase(&mut self, phase: PhaseResult) {
        self.phases.push(phase);
    }

    pub fn total_files(&self) -> usize {
        self.outputs.iter().map(|o| o.files).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.outputs.iter().map(|o| o.bytes).sum()
    }

    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }
}

/// Prints per-phase timings with their share of the total.
pub fn print_profile_summary(stats: &RunStats) {
    let total = stats.total_duration();
    println!("\nPerformance profile:");
    for phase in &stats.phases {
        let share = if total.is_zero() {
            0.0
        } else {
            phase.duration.as_secs_f64() / total.as_secs_f64() * 100.0
        };
        let elapsed = format!("{:.2?}", phase.duration);
        println!("  {:<14} {:>10} ({:>5.1}%)", phase.name, elapsed, share);
    }
    println!("  {:<14} {:>10}", "Total", format!("{:.2?}", total));
}

/// Writes the run statistics as pretty-printed JSON.
pub fn save_stats_json(stats: &RunStats, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create stats file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, stats)
        .with_context(|| format!("Failed to write stats to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush stats file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunStats {
        let mut stats = RunStats::new(Mode::Categorized, PathBuf::from("/p"));
        stats.outputs.push(OutputStats {
            destination: PathBuf::from("code_ui.txt"),
            category: Some("ui".to_string()),
            files: 2,
            bytes: 300,
        });
        stats.outputs.push(OutputStats {
            destination: PathBuf::from("code_logic.txt"),
            category: Some("logic".to_string()),
            files: 3,
            bytes: 700,
        });
        stats.add_phase(PhaseResult {
            name: "Scan".to_string(),
            duration: Duration::from_millis(12),
        });
        stats
    }

    #[test]
    fn test_totals() {
        let stats = sample();
        assert_eq!(stats.total_files(), 5);
        assert_eq!(stats.total_bytes(), 1000);
        assert_eq!(stats.total_duration(), Duration::from_millis(12));
    }

    #[test]
    fn test_stats_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let stats = sample();
        save_stats_json(&stats, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"mode\": \"categorized\""));
        let loaded: RunStats = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded, stats);
    }

    #[test]
    fn test_phase_timer() {
        let timer = PhaseTimer::new("Audit");
        let result = timer.finish();
        assert_eq!(result.name, "Audit");
    }
}
