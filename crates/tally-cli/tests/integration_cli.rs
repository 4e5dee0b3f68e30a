//! Integration tests for the tally binary.
//!
//! Each test writes a real report to a temporary directory and runs the
//! binary against it.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tally_graph::test_utils::sample_report;
use tally_graph::BuildReport;
use tempfile::TempDir;

fn write_sample(dir: &TempDir, file: &str) -> PathBuf {
    let path = dir.path().join(file);
    sample_report().save(&path).unwrap();
    path
}

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("TALLY_MAX_CHAIN_DEPTH")
        .env_remove("TALLY_SHOW_ICONS")
        .env_remove("TALLY_SIZE_UNIT")
        .arg("--no-color");
    cmd
}

#[test]
fn test_modules_lists_in_recorded_order() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.json");

    tally(&temp)
        .arg("modules")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Modules (3)"))
        .stdout(predicate::str::is_match("(?s)Physics Module.*Audio Module.*Core").unwrap());
}

#[test]
fn test_modules_reads_binary_reports() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.tally");

    tally(&temp)
        .args(["modules", "--unit", "kib"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("2.00 KiB"));
}

#[test]
fn test_why_prints_chain_for_raw_module_name() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.json");

    tally(&temp)
        .arg("why")
        .arg(&report)
        .arg("Physics")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Physics Module <- Rigidbody <- Required by Scripts",
        ))
        .stdout(predicate::str::contains("Kept by scripts: yes"));
}

#[test]
fn test_why_json_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.json");

    let output = tally(&temp)
        .args(["why", "--json"])
        .arg(&report)
        .arg("Audio Module")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["reasons"][0], "AudioSource");
    assert_eq!(value["script_driven"], false);
}

#[test]
fn test_why_unknown_entity_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.json");

    tally(&temp)
        .arg("why")
        .arg(&report)
        .arg("rigid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'rigid' does not appear"))
        .stderr(predicate::str::contains("Rigidbody"));
}

#[test]
fn test_config_file_limits_chain_depth() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.json");
    fs::write(
        temp.path().join("tally.config.json"),
        r#"{ "max_chain_depth": 1 }"#,
    )
    .unwrap();

    tally(&temp)
        .arg("why")
        .arg(&report)
        .arg("Physics")
        .assert()
        .success()
        .stdout(predicate::str::contains("No chain reaches a root cause within 1 hops."));

    tally(&temp)
        .args(["why", "--max-depth", "4"])
        .arg(&report)
        .arg("Physics")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reason chains:"));
}

#[test]
fn test_env_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.json");
    fs::write(
        temp.path().join("tally.config.json"),
        r#"{ "size_unit": "kib" }"#,
    )
    .unwrap();

    tally(&temp)
        .env("TALLY_SIZE_UNIT", "bytes")
        .arg("summary")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("total size:     7680 B"));
}

#[test]
fn test_summary_json() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.tally");

    let output = tally(&temp)
        .args(["summary", "--json"])
        .arg(&report)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["modules"], 3);
    assert_eq!(value["edges"], 5);
}

#[test]
fn test_missing_report_fails() {
    let temp = TempDir::new().unwrap();

    tally(&temp)
        .args(["summary", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report not found"));
}

#[test]
fn test_report_without_attribution_fails_for_modules() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bare.json");
    BuildReport::new("bare", "ios").save(&path).unwrap();

    tally(&temp)
        .arg("modules")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no attribution data"));
}

#[test]
fn test_corrupt_report_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_sample(&temp, "build.json");

    let mut value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    value["attribution"]["legacyModuleSizes"] = serde_json::json!([1]);
    fs::write(&path, value.to_string()).unwrap();

    tally(&temp)
        .arg("modules")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report is corrupt"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp = TempDir::new().unwrap();
    let report = write_sample(&temp, "build.json");

    tally(&temp)
        .args(["--config", "nope.json", "summary"])
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
