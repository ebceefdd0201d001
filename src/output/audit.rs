//! Per-category audit report.
//!
//! Each report is a standalone markdown table: a title, a banner, the shared
//! preamble (header and separator lines), then the category's rows.

use super::{AUDIT_BANNER_WIDTH, banner};
use std::io::{self, Write};

/// Writes one category's filtered audit table.
///
/// The preamble is written even when `rows` is empty, so every category
/// file stays a valid table.
pub fn write_category_audit<W: Write>(
    writer: &mut W,
    category: &str,
    preamble: &[String],
    rows: &[String],
) -> io::Result<()> {
    writeln!(writer, "{} AUDIT FINDINGS", category.to_uppercase())?;
    writeln!(writer, "{}", banner(AUDIT_BANNER_WIDTH))?;
    writeln!(writer)?;
    for line in preamble.iter().chain(rows) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}
