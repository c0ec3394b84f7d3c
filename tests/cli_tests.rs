use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/baselines")
}

fn perfbaseline() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_perfbaseline"));
    cmd.env_remove("PERFBASELINE_LOG")
        .env_remove("PERFBASELINE_BASELINES_DIR")
        .env_remove("PERFBASELINE_REVIEW_THRESHOLD")
        .env_remove("PERFBASELINE_CRITICAL_THRESHOLD");
    cmd
}

#[test]
fn test_cli_exits_with_success_on_help() {
    perfbaseline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--baselines-dir"));
}

#[test]
fn test_cli_text_report_for_fixtures() {
    perfbaseline()
        .arg("--baselines-dir")
        .arg(fixtures_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("PERFORMANCE ANALYSIS"))
        .stdout(predicate::str::contains("StreamHub Issues Found: 2"))
        .stdout(predicate::str::contains("RECOMMENDATIONS"));
}

#[test]
fn test_cli_json_report() {
    let output = perfbaseline()
        .arg("--baselines-dir")
        .arg(fixtures_dir())
        .args(["--format", "json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["outcome"]["status"], "regressed");
}

#[test]
fn test_cli_gate_fails_on_critical() {
    perfbaseline()
        .arg("--baselines-dir")
        .arg(fixtures_dir())
        .args(["--fail-on", "critical"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("gate:"));
}

#[test]
fn test_cli_gate_passes_with_lenient_thresholds() {
    perfbaseline()
        .arg("--baselines-dir")
        .arg(fixtures_dir())
        .args(["--review", "5", "--critical", "10", "--fail-on", "review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("perform within acceptable range"));
}

#[test]
fn test_cli_missing_report_exits_with_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    perfbaseline()
        .arg("--baselines-dir")
        .arg(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("baseline report"));
}

#[test]
fn test_cli_rejects_inverted_thresholds() {
    perfbaseline()
        .args(["--review", "3", "--critical", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_cli_reads_thresholds_from_env() {
    perfbaseline()
        .arg("--baselines-dir")
        .arg(fixtures_dir())
        .env("PERFBASELINE_REVIEW_THRESHOLD", "4")
        .env("PERFBASELINE_CRITICAL_THRESHOLD", "8")
        .assert()
        .success()
        .stdout(predicate::str::contains("No significant StreamHub performance issues found"));
}
