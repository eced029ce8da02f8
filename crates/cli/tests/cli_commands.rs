use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

const SAMPLE: &str = "0 @I1@ INDI
1 NAME Ola /Nordmann/
1 BIRT
2 DATE 17 MAY 1905
2 PLAC Bergen
1 FAMS @F1@
0 @I2@ INDI
1 NAME Kari /Berg/
1 FAMS @F1@
0 @I3@ INDI
1 NAME Per /Nordmann/
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
";

/// `render` should write `output.html` into the working directory by default.
#[test]
fn render_writes_default_output_in_cwd() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("family.ged"), SAMPLE).expect("write ged");

    cargo_bin_cmd!("famtree")
        .current_dir(dir.path())
        .arg("render")
        .arg("--file")
        .arg("family.ged")
        .arg("--name")
        .arg("Nordmann")
        .assert()
        .success()
        .stdout(predicate::str::contains("Individuals: 3"));

    let html = fs::read_to_string(dir.path().join("output.html")).expect("read output.html");
    assert!(html.contains("<title>Nordmann Family Tree</title>"));
    assert!(html.contains("Born: 17 MAY 1905 at Bergen"));
    assert!(html.contains("<section id=\"families\">"));
}

/// `--family-inline --no-family-section` swaps the families section for
/// inline memberships.
#[test]
fn render_respects_family_toggles() {
    let dir = tempdir().expect("tempdir");
    let ged = dir.path().join("family.ged");
    let out = dir.path().join("tree.html");
    fs::write(&ged, SAMPLE).expect("write ged");

    cargo_bin_cmd!("famtree")
        .arg("render")
        .arg("-f")
        .arg(&ged)
        .arg("--family-inline")
        .arg("--no-family-section")
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).expect("read report");
    assert!(!html.contains("<section id=\"families\">"));
    assert!(html.contains("<p>Child in Nordmann and Berg family</p>"));
}

#[test]
fn render_fails_for_missing_input() {
    let dir = tempdir().expect("tempdir");

    cargo_bin_cmd!("famtree")
        .current_dir(dir.path())
        .arg("render")
        .arg("--file")
        .arg("nope.ged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file does not exist"));
}

/// A family that references an unknown person aborts the run.
#[test]
fn render_fails_on_unresolvable_member() {
    let dir = tempdir().expect("tempdir");
    let ged = dir.path().join("broken.ged");
    fs::write(&ged, "0 @I1@ INDI\n1 NAME A /B/\n0 @F1@ FAM\n1 HUSB @I1@\n1 WIFE @I404@\n")
        .expect("write ged");

    cargo_bin_cmd!("famtree")
        .current_dir(dir.path())
        .arg("render")
        .arg("--file")
        .arg(&ged)
        .assert()
        .failure()
        .stderr(predicate::str::contains("@I404@"));
}

#[test]
fn export_json_prints_tree_to_stdout() {
    let dir = tempdir().expect("tempdir");
    let ged = dir.path().join("family.ged");
    fs::write(&ged, SAMPLE).expect("write ged");

    let output = cargo_bin_cmd!("famtree")
        .arg("export-json")
        .arg("--file")
        .arg(&ged)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let tree: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(tree["families"][0]["family_name"], "Nordmann and Berg");
    assert_eq!(tree["individuals"][2]["families"][0]["position_of_individual"], "Child");
}

#[test]
fn summary_json_lists_counts() {
    let dir = tempdir().expect("tempdir");
    let ged = dir.path().join("family.ged");
    fs::write(&ged, SAMPLE).expect("write ged");

    cargo_bin_cmd!("famtree")
        .arg("summary")
        .arg("--file")
        .arg(&ged)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"individuals\": 3"))
        .stdout(predicate::str::contains("\"families\": 1"));
}
