//! Splits a markdown audit table into per-category tables.
//!
//! Parsing is a two-state line machine. Before the header, every line with
//! at least four `|` cells goes into the preamble; the first one containing
//! `Severity` is the header and switches to the table state. Inside the
//! table, separator lines extend the preamble and every other well-formed
//! line is a data row whose third cell names the file it is about.
//!
//! Each category's output repeats the whole preamble, so every file is a
//! valid table on its own.

use crate::classify::{Classifier, normalize_path};
use crate::config::Config;
use crate::data::AuditRow;
use crate::metrics::{AuditCategoryStats, AuditStats};
use crate::output::write_category_audit;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Column label that identifies the table header.
pub const HEADER_MARKER: &str = "Severity";

/// Split cells a line needs before it is considered part of the table.
const MIN_CELLS: usize = 4;

/// Index of the path-bearing cell (the leading pipe yields an empty cell 0).
const PATH_CELL: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    BeforeHeader,
    InTable,
}

/// Preamble and data rows of an audit table, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTable {
    pub preamble: Vec<String>,
    pub rows: Vec<AuditRow>,
}

/// True for markdown separator lines such as `|---|:---:|`.
pub fn is_separator(line: &str) -> bool {
    line.contains("---")
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

fn backticked(cell: &str) -> Option<&str> {
    let start = cell.find('`')?;
    let rest = &cell[start + 1..];
    let end = rest.find('`')?;
    Some(&rest[..end])
}

/// Drops a `:42` or `:10-20` line reference from the end of a path.
fn strip_line_suffix(path: &str) -> &str {
    match path.rsplit_once(':') {
        Some((head, tail))
            if !head.is_empty()
                && !tail.is_empty()
                && tail.chars().all(|c| c.is_ascii_digit() || c == '-') =>
        {
            head
        }
        _ => path,
    }
}

/// Path named by a data row, or `None` when the row has no usable path.
///
/// Backtick-quoted text in the path cell wins over the raw cell text.
pub fn extract_row_path(line: &str) -> Option<String> {
    let cell = line.split('|').nth(PATH_CELL)?;
    let raw = backticked(cell).unwrap_or(cell).trim();
    let path = normalize_path(strip_line_suffix(raw));
    if path.is_empty() { None } else { Some(path) }
}

/// Parses the audit report text. Lines outside the table are ignored.
pub fn parse_audit_table(text: &str) -> AuditTable {
    let mut table = AuditTable::default();
    let mut state = ParseState::BeforeHeader;

    for line in text.lines() {
        if line.split('|').count() < MIN_CELLS {
            continue;
        }
        match state {
            ParseState::BeforeHeader => {
                table.preamble.push(line.to_string());
                if line.contains(HEADER_MARKER) {
                    state = ParseState::InTable;
                }
            }
            ParseState::InTable => {
                if is_separator(line) {
                    table.preamble.push(line.to_string());
                } else if let Some(path) = extract_row_path(line) {
                    table.rows.push(AuditRow {
                        line: line.to_string(),
                        path,
                    });
                }
            }
        }
    }

    table
}

/// Rows of an [`AuditTable`] distributed over the configured categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedAudit {
    /// Row lines per category index, in source order
    pub buckets: Vec<Vec<String>>,
    pub matched: usize,
    pub defaulted: usize,
    /// Rows with no match and no default category to fall back on
    pub unassigned: Vec<AuditRow>,
}

/// Assigns every row to the first matching category, falling back to
/// `default_category` when nothing matches.
pub fn categorize(
    table: &AuditTable,
    classifier: &Classifier,
    default_category: Option<usize>,
) -> CategorizedAudit {
    let mut result = CategorizedAudit {
        buckets: vec![Vec::new(); classifier.category_count()],
        ..CategorizedAudit::default()
    };

    for row in &table.rows {
        match (classifier.category_for(&row.path), default_category) {
            (Some(idx), _) => {
                result.buckets[idx].push(row.line.clone());
                result.matched += 1;
            }
            (None, Some(idx)) => {
                result.buckets[idx].push(row.line.clone());
                result.defaulted += 1;
            }
            (None, None) => result.unassigned.push(row.clone()),
        }
    }

    result
}

/// Reads the configured audit report under `root` and writes one filtered
/// table per category.
///
/// Returns `Ok(None)` when the report does not exist; that is a notice, not
/// an error.
pub fn split_audit_report(
    root: &Path,
    config: &Config,
    classifier: &Classifier,
) -> Result<Option<AuditStats>> {
    let source = root.join(&config.audit_report);
    if !source.is_file() {
        println!(
            "Audit report {} not found, skipping audit categorization.",
            config.audit_report.display()
        );
        return Ok(None);
    }

    let text = fs::read_to_string(&source)
        .with_context(|| format!("Failed to read audit report {}", source.display()))?;
    let table = parse_audit_table(&text);
    let split = categorize(&table, classifier, config.default_category_index());

    for row in &split.unassigned {
        eprintln!(
            "Warning: audit row for '{}' matches no category and no default is set",
            row.path
        );
    }

    let mut writers = Vec::with_capacity(config.categories.len());
    for category in &config.categories {
        let dest = root.join(category.audit_output_path());
        let file = File::create(&dest)
            .with_context(|| format!("Failed to create audit report {}", dest.display()))?;
        writers.push((dest, BufWriter::new(file)));
    }

    let mut categories = Vec::with_capacity(config.categories.len());
    for ((category, rows), (dest, writer)) in config
        .categories
        .iter()
        .zip(&split.buckets)
        .zip(writers.iter_mut())
    {
        write_category_audit(writer, &category.name, &table.preamble, rows)
            .with_context(|| format!("Failed to write audit report {}", dest.display()))?;
        categories.push(AuditCategoryStats {
            category: category.name.clone(),
            destination: category.audit_output_path(),
            rows: rows.len(),
        });
    }

    Ok(Some(AuditStats {
        source: config.audit_report.clone(),
        matched: split.matched,
        defaulted: split.defaulted,
        unassigned: split.unassigned.len(),
        categories,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Category;

    const REPORT: &str = "\
# Audit

Some prose | with a pipe.

| # | File | Severity | Finding |
|---|------|----------|---------|
| 1 | `src/core/engine.ts` | High | race in queue |
| 2 | `src/ui/panel.ts:42` | Low | contrast |
| 3 | docs/notes.md | Info | typo |
| 4 | `src/ui-extra/x.ts` | Medium | leak |
| short |
| 5 |  | Low | no path |
";

    fn config(default: Option<&str>) -> Config {
        Config {
            categories: vec![
                Category::new("ui", &["src/ui"], &[]),
                Category::new("logic", &["src/core"], &[]),
                Category::new("config", &[], &["package.json"]),
            ],
            default_category: default.map(str::to_string),
            ..Config::default()
        }
    }

    #[test]
    fn test_extract_row_path() {
        assert_eq!(
            extract_row_path("| File | `src/core/engine.ts` | High | desc |").as_deref(),
            Some("src/core/engine.ts")
        );
        assert_eq!(
            extract_row_path("| 3 | src\\ui\\a.ts | Low | x |").as_deref(),
            Some("src/ui/a.ts")
        );
        assert_eq!(
            extract_row_path("| 1 | `src/a.ts:10-20` | Low | x |").as_deref(),
            Some("src/a.ts")
        );
        assert_eq!(extract_row_path("| 1 |   | Low | x |"), None);
    }

    #[test]
    fn test_is_separator() {
        assert!(is_separator("|---|:---:|---|"));
        assert!(is_separator("| --- | --- | --- |"));
        assert!(!is_separator("| 1 | `a---b.ts` | Low | x |"));
        assert!(!is_separator("| a | b | c |"));
    }

    #[test]
    fn test_parse_collects_preamble_and_rows() {
        let table = parse_audit_table(REPORT);
        assert_eq!(
            table.preamble,
            vec![
                "| # | File | Severity | Finding |".to_string(),
                "|---|------|----------|---------|".to_string(),
            ]
        );
        let paths: Vec<&str> = table.rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "src/core/engine.ts",
                "src/ui/panel.ts",
                "docs/notes.md",
                "src/ui-extra/x.ts"
            ]
        );
    }

    #[test]
    fn test_pipe_lines_before_header_join_preamble() {
        let text = "| Summary | a | b |\n| x | File | Severity | y |\n|---|---|---|---|\n";
        let table = parse_audit_table(text);
        assert_eq!(table.preamble.len(), 3);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_crlf_input() {
        let text = "| # | File | Severity | F |\r\n|---|---|---|---|\r\n| 1 | `src/ui/a.ts` | Low | x |\r\n";
        let table = parse_audit_table(text);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].line, "| 1 | `src/ui/a.ts` | Low | x |");
    }

    #[test]
    fn test_every_row_lands_in_exactly_one_bucket() {
        let config = config(Some("logic"));
        let classifier = Classifier::new(&config);
        let table = parse_audit_table(REPORT);
        let split = categorize(&table, &classifier, config.default_category_index());

        let total: usize = split.buckets.iter().map(Vec::len).sum();
        assert_eq!(total, table.rows.len());
        assert_eq!(split.matched, 2);
        assert_eq!(split.defaulted, 2);
        assert!(split.unassigned.is_empty());

        assert_eq!(split.buckets[0].len(), 1);
        assert!(split.buckets[0][0].contains("src/ui/panel.ts"));
        assert_eq!(split.buckets[1].len(), 3);
        assert!(split.buckets[1][0].contains("src/core/engine.ts"));
        assert!(split.buckets[2].is_empty());
    }

    #[test]
    fn test_without_default_rows_are_surfaced() {
        let config = config(None);
        let classifier = Classifier::new(&config);
        let table = parse_audit_table(REPORT);
        let split = categorize(&table, &classifier, None);

        assert_eq!(split.matched, 2);
        assert_eq!(split.defaulted, 0);
        let unassigned: Vec<&str> = split.unassigned.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(unassigned, vec!["docs/notes.md", "src/ui-extra/x.ts"]);
    }
}
