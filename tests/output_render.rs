use srcbundle::cli::Mode;
use srcbundle::metrics::{AuditCategoryStats, AuditStats, OutputStats, RunStats};
use srcbundle::output::{render_summary, write_summary};
use std::path::PathBuf;

fn sample_stats() -> RunStats {
    let mut stats = RunStats::new(Mode::Categorized, PathBuf::from("/mnt/app"));
    stats.outputs = vec![
        OutputStats {
            destination: PathBuf::from("code_ui.txt"),
            category: Some("ui".to_string()),
            files: 2,
            bytes: 300,
        },
        OutputStats {
            destination: PathBuf::from("code_logic.txt"),
            category: Some("logic".to_string()),
            files: 3,
            bytes: 700,
        },
    ];
    stats.skipped = vec!["src/broken.ts".to_string()];
    stats.audit = Some(AuditStats {
        source: PathBuf::from("audit-report.md"),
        matched: 3,
        defaulted: 1,
        unassigned: 0,
        categories: vec![
            AuditCategoryStats {
                category: "ui".to_string(),
                destination: PathBuf::from("audit_ui.txt"),
                rows: 1,
            },
            AuditCategoryStats {
                category: "logic".to_string(),
                destination: PathBuf::from("audit_logic.txt"),
                rows: 3,
            },
        ],
    });
    stats
}

fn summary_text(stats: &RunStats) -> String {
    let mut out = Vec::new();
    write_summary(&mut out, stats).expect("Failed to write summary");
    String::from_utf8(out).expect("Summary is not UTF-8")
}

#[test]
fn test_summary_output_lines() {
    let text = summary_text(&sample_stats());
    let lines: Vec<&str> = text.lines().collect();

    let ui = lines
        .iter()
        .find(|l| l.starts_with("[ui      ]    2 file(s)"))
        .expect("ui output line missing");
    assert!(ui.contains("300 B"));
    assert!(ui.ends_with("-> code_ui.txt"));

    let logic = lines
        .iter()
        .find(|l| l.starts_with("[logic   ]    3 file(s)"))
        .expect("logic output line missing");
    assert!(logic.ends_with("-> code_logic.txt"));

    assert!(lines.contains(&"Skipped 1 unreadable file(s):"));
    assert!(lines.contains(&"  src/broken.ts"));
}

#[test]
fn test_summary_audit_lines() {
    let text = summary_text(&sample_stats());

    assert!(text.contains(
        "Audit report audit-report.md: 4 row(s) (3 matched, 1 defaulted, 0 unassigned)\n"
    ));
    assert!(text.contains("[ui      ]    1 row(s)  -> audit_ui.txt\n"));
    assert!(text.contains("[logic   ]    3 row(s)  -> audit_logic.txt\n"));
    assert!(text.contains("Done! Consolidated 5 file(s) ("));
    assert!(text.trim_end().ends_with("into 2 report(s)."));
}

#[test]
fn test_summary_single_mode_without_audit() {
    let mut stats = RunStats::new(Mode::Single, PathBuf::from("/mnt/app"));
    stats.outputs.push(OutputStats {
        destination: PathBuf::from("all_code.txt"),
        category: None,
        files: 1,
        bytes: 10,
    });

    let text = summary_text(&stats);
    assert!(text.contains("[all     ]    1 file(s)"));
    assert!(!text.contains("Audit report"));
    assert!(!text.contains("Skipped"));
}

#[test]
fn test_terminal_rendering() {
    let result = render_summary(&sample_stats());
    assert!(result.is_ok());
}
