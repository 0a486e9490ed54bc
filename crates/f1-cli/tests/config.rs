use std::fs;

use f1_cli::config::{OptionOverrides, parse_options, resolve_options};
use f1_model::{PipelineOptions, PitStopJoinPolicy, SourceTable, UnresolvedKeyPolicy};

#[test]
fn empty_config_is_the_default() {
    let options = parse_options("").expect("parse");
    assert_eq!(options, PipelineOptions::default());
}

#[test]
fn reads_every_option() {
    let options = parse_options(
        r#"
        unresolved_keys = "sentinel"
        pit_stop_join = "expand"
        sentinel_race_date = "1950-05-13"
        placeholder_tables = ["results"]
        "#,
    )
    .expect("parse");
    assert_eq!(options.unresolved_keys, UnresolvedKeyPolicy::Sentinel);
    assert_eq!(options.pit_stop_join, PitStopJoinPolicy::Expand);
    assert_eq!(options.sentinel_race_date.to_string(), "1950-05-13");
    assert!(options.placeholder_tables.contains(&SourceTable::Results));
    assert!(!options.placeholder_tables.contains(&SourceTable::Status));
}

#[test]
fn rejects_unknown_keys() {
    let error = parse_options("pit_stop_policy = \"first\"").expect_err("unknown key");
    assert!(format!("{error:#}").contains("pit_stop_policy"));
}

#[test]
fn overrides_win_over_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("etl.toml");
    fs::write(&path, "unresolved_keys = \"sentinel\"\npit_stop_join = \"first\"\n")
        .expect("write config");

    let overrides = OptionOverrides {
        unresolved_keys: None,
        pit_stop_join: Some(PitStopJoinPolicy::Expand),
    };
    let options = resolve_options(Some(&path), overrides).expect("resolve");
    assert_eq!(options.unresolved_keys, UnresolvedKeyPolicy::Sentinel);
    assert_eq!(options.pit_stop_join, PitStopJoinPolicy::Expand);
}

#[test]
fn missing_config_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let error = resolve_options(Some(&path), OptionOverrides::default()).expect_err("missing");
    assert!(format!("{error:#}").contains("absent.toml"));
}
