use srcbundle::classify::{Classifier, matches_dir, normalize_path};
use srcbundle::config::{Category, Config};
use srcbundle::utils::{
    build_exclude_matcher, expand_exclude_patterns, project_name, relative_path,
};
use std::path::PathBuf;

#[test]
fn test_relative_path() {
    let root = PathBuf::from("/home/user/app");
    let file = PathBuf::from("/home/user/app/src/ui/panel.ts");

    assert_eq!(
        relative_path(&root, &file).as_deref(),
        Some("src/ui/panel.ts")
    );
    assert_eq!(relative_path(&root, &root).as_deref(), Some(""));
    assert_eq!(relative_path(&root, &PathBuf::from("/etc/hosts")), None);
}

#[test]
fn test_project_name() {
    let root = PathBuf::from("/home/user/StreamGrabber");
    assert_eq!(project_name(None, &root), "StreamGrabber");
    assert_eq!(project_name(Some("Grabber"), &root), "Grabber");
}

#[test]
fn test_expand_exclude_patterns() {
    let patterns = vec![
        "coverage".to_string(),
        "*.min.js".to_string(),
        "temp/".to_string(),
        "  ".to_string(),
    ];

    let expanded = expand_exclude_patterns(&patterns);

    // Should expand "coverage" to multiple patterns
    assert!(expanded.contains(&"**/coverage".to_string()));
    assert!(expanded.contains(&"**/coverage/**".to_string()));

    // Should keep "*.min.js" as-is (contains glob)
    assert!(expanded.contains(&"*.min.js".to_string()));

    // Should keep "temp/" as-is (ends with slash)
    assert!(expanded.contains(&"temp/".to_string()));

    // Blank patterns are dropped
    assert_eq!(expanded.len(), 4);
}

#[test]
fn test_build_exclude_matcher() {
    let patterns = vec!["*.min.js".to_string(), "**/coverage/**".to_string()];

    let matcher = build_exclude_matcher(&patterns);
    assert!(matcher.is_ok());

    let matcher = matcher.unwrap();
    assert!(matcher.is_match("vendor.min.js"));
    assert!(matcher.is_match("web/coverage/index.html"));
    assert!(!matcher.is_match("src/main.ts"));
}

#[test]
fn test_build_exclude_matcher_invalid_pattern() {
    let patterns = vec![
        "[invalid".to_string(), // Invalid glob pattern
    ];

    let matcher = build_exclude_matcher(&patterns);
    assert!(matcher.is_err());
}

#[test]
fn test_prefix_rule_with_either_separator() {
    let config = Config {
        categories: vec![Category::new("ui", &["src/ui"], &[])],
        ..Config::default()
    };
    let classifier = Classifier::new(&config);

    assert_eq!(classifier.category_for("src/ui/panel.ts"), Some(0));
    assert_eq!(classifier.category_for("src\\ui\\panel.ts"), Some(0));
    assert_eq!(classifier.category_for("src/ui-extra/x.ts"), None);

    assert!(matches_dir(&normalize_path("src\\ui\\panel.ts"), "src/ui"));
}

#[test]
fn test_audit_path_routes_to_owning_prefix() {
    let config = Config::default();
    let classifier = Classifier::new(&config);
    let row = "| File | `src/core/engine.ts` | High | desc |";

    let path = srcbundle::audit::extract_row_path(row).unwrap();
    let idx = classifier.category_for(&path).unwrap();
    assert_eq!(config.categories[idx].name, "logic");
}

#[test]
fn test_extension_filter_in_single_mode() {
    let classifier = Classifier::new(&Config::default());

    // Allowed directory, disallowed extension
    assert!(!classifier.is_relevant("src/ui/Toolbar.tsx"));
    // Allowed extension, outside every allowed directory and file
    assert!(!classifier.is_relevant("scripts/build.ts"));
    assert!(!classifier.is_relevant("notes.md"));
    // Explicit file at the root
    assert!(classifier.is_relevant("vite.config.ts"));
    assert!(classifier.is_relevant("src/ui/panel.ts"));
}

#[test]
fn test_unmodeled_extension_excluded_from_categories() {
    let classifier = Classifier::new(&Config::default());
    assert_eq!(classifier.source_category("src/ui/Toolbar.tsx"), None);
    assert_eq!(classifier.source_category("src/ui/Toolbar.ts"), Some(0));
}
