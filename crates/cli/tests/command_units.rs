use std::fs;

use famtree::commands::{
    export_json_command, render_command, resolve_report_options, tree_summary, RenderArgs,
};
use tempfile::tempdir;

const SAMPLE: &str = "0 HEAD
0 @I1@ INDI
1 NAME John /Smith/
1 FAMS @F1@
0 @I2@ INDI
1 NAME Mary /Jones/
1 FAMS @F1@
1 FAMS @F9@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
0 TRLR
";

fn write_sample(dir: &std::path::Path) -> String {
    let path = dir.join("smith.ged");
    fs::write(&path, SAMPLE).expect("write sample");
    path.to_string_lossy().to_string()
}

#[test]
fn report_options_merge_config_and_flags() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("report.yaml");
    fs::write(&config, "name: FromConfig\nfamily_section: true\n").unwrap();

    let args = RenderArgs {
        config: Some(config.to_string_lossy().to_string()),
        family_section: true,
        ..Default::default()
    };
    let options = resolve_report_options(&args).unwrap();
    assert_eq!(options.name.as_deref(), Some("FromConfig"));
    assert!(options.family_section);

    let args =
        RenderArgs { name: Some("Flag".into()), family_inline: true, family_section: false, ..args };
    let options = resolve_report_options(&args).unwrap();
    assert_eq!(options.name.as_deref(), Some("Flag"));
    assert!(options.family_inline);
    // `family_section: false` in args means `--no-family-section` was given.
    assert!(!options.family_section);
}

#[test]
fn render_command_writes_report() {
    let dir = tempdir().unwrap();
    let file = write_sample(dir.path());
    let output = dir.path().join("out").join("report.html");

    let args = RenderArgs {
        file,
        name: Some("Smith".into()),
        family_section: true,
        output: Some(output.to_string_lossy().to_string()),
        ..Default::default()
    };
    let written = render_command(&args).expect("render");

    let html = fs::read_to_string(&written).expect("read report");
    assert!(html.contains("<title>Smith Family Tree</title>"));
    assert!(html.contains("Smith and Jones family"));
}

#[test]
fn export_json_command_writes_tree() {
    let dir = tempdir().unwrap();
    let file = write_sample(dir.path());
    let output = dir.path().join("tree.json");

    export_json_command(&file, Some(output.to_str().unwrap())).expect("export");

    let tree: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(tree["families"][0]["family_id"], "F1");
    assert_eq!(tree["individuals"][1]["families"][0]["position_of_individual"], "Wife");
}

#[test]
fn summary_reports_skipped_family_reference() {
    let dir = tempdir().unwrap();
    let file = write_sample(dir.path());

    let summary = tree_summary(&file).expect("summary");
    assert_eq!(summary.name.as_deref(), Some("smith"));
    assert_eq!(summary.individuals, 2);
    assert_eq!(summary.families, 1);
    assert_eq!(summary.diagnostics.len(), 1);
}
