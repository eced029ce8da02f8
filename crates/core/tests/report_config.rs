use std::fs;

use famtree_core::config::{load_report_options, ReportOptions};
use tempfile::tempdir;

#[test]
fn defaults_match_cli_defaults() {
    let options = ReportOptions::default();
    assert_eq!(options.name, None);
    assert!(!options.family_inline);
    assert!(options.family_section);
    assert_eq!(options.title(), "Family Tree");
}

#[test]
fn title_includes_name() {
    let options = ReportOptions::default().with_name(Some("Smith".into()));
    assert_eq!(options.title(), "Smith Family Tree");
    assert_eq!(options.with_name(None).title(), "Smith Family Tree");
}

#[test]
fn loads_yaml_with_partial_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.yaml");
    fs::write(&path, "name: Jones\nfamily_inline: true\n").unwrap();

    let options = load_report_options(&path).expect("load yaml");
    assert_eq!(options.name.as_deref(), Some("Jones"));
    assert!(options.family_inline);
    assert!(options.family_section);
}

#[test]
fn loads_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    fs::write(&path, r#"{"family_section": false}"#).unwrap();

    let options = load_report_options(&path).expect("load json");
    assert_eq!(options.name, None);
    assert!(!options.family_section);
}

#[test]
fn rejects_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.toml");
    fs::write(&path, "name = 'x'").unwrap();

    let err = load_report_options(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported report config format"));
}
