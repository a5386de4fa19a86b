//! End-to-end tests for the ordval binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/orders.json")
}

/// Home directory with no ordval config, so runs never read the user's own file.
fn isolated_home() -> PathBuf {
    let home = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("ordval-home");
    fs::create_dir_all(home.join(".config")).unwrap();
    home
}

fn ordval() -> Command {
    let home = isolated_home();
    let mut cmd = Command::cargo_bin("ordval").unwrap();
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn test_check_json_summary() {
    let output = ordval().arg("check").arg(fixture()).output().unwrap();
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_orders"], 7);
    assert_eq!(summary["total_line_items"], 7);
    assert_eq!(summary["invalid_orders_count"], 6);

    let problematic = summary["problematic_orders"].as_array().unwrap();
    assert_eq!(problematic.len(), 6);
    assert_eq!(
        problematic[0],
        json!({"id": "A-1002", "reasons": ["payment not captured"]})
    );
    assert_eq!(
        problematic[1],
        json!({"id": "A-1003", "reasons": ["refund mismatch, got 9 expected 10"]})
    );
    assert_eq!(
        problematic[2],
        json!({"id": "", "reasons": [
            "missing/invalid id",
            "empty lines",
            "invalid email 'bad-email'"
        ]})
    );
    assert_eq!(
        problematic[3],
        json!({"id": "A-1004", "reasons": ["line 1 qty not positive (0)"]})
    );
    assert_eq!(
        problematic[4],
        json!({"id": "A-1005", "reasons": ["invalid shipping fee -1"]})
    );
    assert_eq!(
        problematic[5],
        json!({"id": "A-1001", "reasons": ["duplicate id 'A-1001'"]})
    );
}

#[test]
fn test_check_strict_fails_on_invalid_orders() {
    ordval()
        .args(["check", "--strict"])
        .arg(fixture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("6 of 7 orders are invalid"));
}

#[test]
fn test_check_expect_ids() {
    ordval()
        .arg("check")
        .arg(fixture())
        .args(["--expect-ids", "A-1001,A-1002,A-1003,A-1004,A-1005"])
        .assert()
        .success();

    ordval()
        .arg("check")
        .arg(fixture())
        .args(["--expect-ids", "A-1001,A-1002,A-1003,A-1004,A-1005,A-1006"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing [A-1006]"));
}

#[test]
fn test_check_text_format() {
    ordval()
        .arg("check")
        .arg(fixture())
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FAIL: order A-1002"))
        .stdout(predicate::str::contains("  - payment not captured"))
        .stdout(predicate::str::contains("Invalid orders: 6"));
}

#[test]
fn test_check_csv_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("problems.csv");

    ordval()
        .arg("check")
        .arg(fixture())
        .args(["--format", "csv", "--output"])
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("order_id,code,reason\n"));
    assert!(csv.contains("A-1005,invalid_shipping_fee,invalid shipping fee -1"));
    // header + 8 problems
    assert_eq!(csv.lines().count(), 9);
}

#[test]
fn test_check_missing_orders_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("doc.json");
    fs::write(&doc, r#"{"items": []}"#).unwrap();

    ordval()
        .arg("check")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no \"orders\" collection"));
}

#[test]
fn test_check_missing_input_file() {
    ordval()
        .args(["check", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_check_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"rules": {"shipping_fee_policy": "any"}, "output": {"pretty": false}}"#,
    )
    .unwrap();

    let output = ordval()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(fixture())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    let summary: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["invalid_orders_count"], 5);
}

#[test]
fn test_default_config_path_is_isolated() {
    let output = ordval().args(["config", "path"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("ordval-home"));
    assert!(stdout.contains("not created"));
}

#[test]
fn test_config_init_set_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");

    ordval()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    ordval()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    ordval()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "rules.require_shipping_fee", "true"])
        .assert()
        .success();

    ordval()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "rules.require_shipping_fee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));

    ordval()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "rules.shipping_fee_policy", "sideways"])
        .assert()
        .failure();
}

#[test]
fn test_batch_with_summary() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture(), dir.path().join("day1.json")).unwrap();
    fs::write(dir.path().join("day2.json"), r#"{"orders": []}"#).unwrap();
    fs::write(dir.path().join("broken.json"), "{").unwrap();
    let reports = dir.path().join("reports");
    let pattern = format!("{}/*.json", dir.path().display());

    ordval()
        .args(["batch", pattern.as_str(), "--continue-on-error", "--summary", "--output-dir"])
        .arg(&reports)
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 3 files"));

    let summary = fs::read_to_string(reports.join("summary.csv")).unwrap();
    assert!(summary.contains("day1.json,invalid,7,7,6,"));
    assert!(summary.contains("day2.json,clean,0,0,0,"));
    assert!(summary.contains("broken.json,error,"));
    assert!(reports.join("day1.report.json").exists());
}

#[test]
fn test_batch_stops_on_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.json"), r#"{"orders": 5}"#).unwrap();
    let pattern = format!("{}/*.json", dir.path().display());

    ordval()
        .args(["batch", pattern.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"orders\" must be an array"));
}
