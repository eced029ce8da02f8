use std::fs;
use std::path::Path;

use famtree::{canonicalize_or_current, infer_tree_name, log_filter_for, resolve_input_file};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let result = canonicalize_or_current(".").expect("canonicalize");
    assert_eq!(result, std::env::current_dir().expect("cwd"));
}

#[test]
fn canonicalize_or_current_keeps_missing_paths_absolute() {
    let result = canonicalize_or_current("not-there-yet.html").expect("resolve");
    assert!(result.is_absolute());
    assert!(result.ends_with("not-there-yet.html"));
}

#[test]
fn resolve_input_file_requires_existing_file() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("tree.ged");
    fs::write(&file, "0 HEAD\n0 TRLR\n").expect("write");

    let resolved = resolve_input_file(file.to_str().unwrap()).expect("resolve existing");
    assert_eq!(resolved, file.canonicalize().unwrap());

    let missing = tmp.path().join("missing.ged");
    let err = resolve_input_file(missing.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Input file does not exist"));
}

#[test]
fn infer_tree_name_uses_file_stem() {
    assert_eq!(infer_tree_name(Path::new("/data/smith.ged")), Some("smith".to_string()));
    assert_eq!(infer_tree_name(Path::new("/")), None);
}

#[test]
fn verbosity_maps_to_log_filters() {
    assert_eq!(log_filter_for(0), "warn");
    assert_eq!(log_filter_for(1), "info");
    assert_eq!(log_filter_for(5), "debug");
}
