//! Consolidated source report.
//!
//! Layout of a report:
//!
//! ```text
//! Project: <name>
//! Root: <absolute root>
//! ================================================================================
//!
//!
//! ====================
//! File: src/main.ts
//! ====================
//!
//! <contents>
//! ```

use super::{HEADER_BANNER_WIDTH, SECTION_BANNER_WIDTH, banner};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Appends banner-delimited file sections to a single destination.
///
/// The header is written once, on construction.
#[derive(Debug)]
pub struct ReportWriter<W: Write> {
    writer: W,
    files: usize,
    bytes: u64,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(mut writer: W, project: &str, root: &Path) -> io::Result<Self> {
        writeln!(writer, "Project: {}", project)?;
        writeln!(writer, "Root: {}", root.display())?;
        writeln!(writer, "{}", banner(HEADER_BANNER_WIDTH))?;
        writeln!(writer)?;
        Ok(Self {
            writer,
            files: 0,
            bytes: 0,
        })
    }

    /// Writes one file section: banner, `File:` line, banner, blank line,
    /// the contents and a trailing newline.
    pub fn write_section(&mut self, rel_path: &str, content: &str) -> io::Result<()> {
        let rule = banner(SECTION_BANNER_WIDTH);
        write!(self.writer, "\n{rule}\nFile: {rel_path}\n{rule}\n\n")?;
        self.writer.write_all(content.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.files += 1;
        self.bytes += content.len() as u64;
        Ok(())
    }

    /// Number of sections written so far.
    pub fn files(&self) -> usize {
        self.files
    }

    /// Total bytes of file content written so far (banners excluded).
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Creates (truncating) the report at `path` and writes its header.
pub fn create_report(
    path: &Path,
    project: &str,
    root: &Path,
) -> Result<ReportWriter<BufWriter<File>>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    ReportWriter::new(BufWriter::new(file), project, root)
        .with_context(|| format!("Failed to write header to {}", path.display()))
}
