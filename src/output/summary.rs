//! Terminal summary printed when a run completes.

use crate::metrics::RunStats;
use anyhow::Result;
use humansize::{DECIMAL, format_size};
use std::io::{self, Write};

/// Writes file counts per output, skipped files and audit row counts.
pub fn write_summary<W: Write>(writer: &mut W, stats: &RunStats) -> io::Result<()> {
    writeln!(writer)?;
    for output in &stats.outputs {
        let label = output.category.as_deref().unwrap_or("all");
        writeln!(
            writer,
            "[{:<8}] {:>4} file(s) {:>10}  -> {}",
            label,
            output.files,
            format_size(output.bytes, DECIMAL),
            output.destination.display()
        )?;
    }

    if !stats.skipped.is_empty() {
        writeln!(writer, "Skipped {} unreadable file(s):", stats.skipped.len())?;
        for path in &stats.skipped {
            writeln!(writer, "  {}", path)?;
        }
    }

    if let Some(audit) = &stats.audit {
        writeln!(
            writer,
            "\nAudit report {}: {} row(s) ({} matched, {} defaulted, {} unassigned)",
            audit.source.display(),
            audit.total_rows(),
            audit.matched,
            audit.defaulted,
            audit.unassigned
        )?;
        for category in &audit.categories {
            writeln!(
                writer,
                "[{:<8}] {:>4} row(s)  -> {}",
                category.category,
                category.rows,
                category.destination.display()
            )?;
        }
    }

    writeln!(
        writer,
        "\nDone! Consolidated {} file(s) ({}) into {} report(s).",
        stats.total_files(),
        format_size(stats.total_bytes(), DECIMAL),
        stats.outputs.len()
    )
}

/// Prints the summary to stdout.
pub fn render(stats: &RunStats) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_summary(&mut handle, stats)?;
    handle.flush()?;
    Ok(())
}
