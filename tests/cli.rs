//! End-to-end tests for the restic-kit binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const BACKUP_OUT: &str = r#"{"message_type":"status","percent_done":0.5}
{"message_type":"summary","files_new":5,"files_changed":2,"files_unmodified":100,"dirs_new":1,"dirs_changed":0,"dirs_unmodified":10,"data_added":1536,"data_added_packed":1024,"total_files_processed":107,"total_bytes_processed":1048576,"total_duration":12.5,"snapshot_id":"abc"}"#;

const CHECK_OUT: &str = r#"{"message_type":"summary","num_errors":0}"#;

const SNAPSHOTS_OUT: &str = r#"[{"group_key":{"hostname":"nas","paths":["/home"],"tags":null},"snapshots":[
{"id":"1111","short_id":"1111","time":"2025-01-01T00:00:00.123456789Z","paths":["/home"],"hostname":"nas","summary":{"files_new":100,"total_files_processed":100,"data_added":1000,"total_bytes_processed":1000}},
{"id":"2222","short_id":"2222","time":"2025-01-02T00:00:00.123456789Z","paths":["/home"],"hostname":"nas","summary":{"files_new":5,"total_files_processed":102,"data_added":200,"total_bytes_processed":1200}}
]}]"#;

const FORGET_OUT: &str = r#"applying policy...
[{"tags":null,"host":"nas","paths":["/home"],"keep":[{"id":"2222"}],"remove":[{"id":"1111"}],"reasons":[]}]
"#;

fn write_artifact(dir: &Path, base: &str, exit_code: &str, out: &str, age_secs: u64) {
    let exitcode_path = dir.join(format!("{}.exitcode", base));
    fs::write(&exitcode_path, exit_code).unwrap();
    fs::write(dir.join(format!("{}.out", base)), out).unwrap();
    File::options()
        .write(true)
        .open(&exitcode_path)
        .unwrap()
        .set_modified(SystemTime::now() - Duration::from_secs(age_secs))
        .unwrap();
}

fn pipeline_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    // Written in reverse so that name order and creation order both disagree with mtime order
    write_artifact(dir, "forget", "0", FORGET_OUT, 10);
    write_artifact(dir, "snapshots", "0", SNAPSHOTS_OUT, 20);
    write_artifact(dir, "check", "0", CHECK_OUT, 30);
    write_artifact(dir, "backup.home", "0", BACKUP_OUT, 40);
    temp_dir
}

fn restic_kit() -> Command {
    let mut cmd = Command::cargo_bin("restic-kit").unwrap();
    cmd.env_remove("RESTIC_KIT_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn report_lists_actions_in_execution_order() {
    let temp_dir = pipeline_dir();

    let output = restic_kit()
        .arg("report")
        .arg(temp_dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();

    assert!(text.starts_with("Overall Status: SUCCESS\n"));
    let positions: Vec<_> = ["✅ backup home", "✅ check", "✅ snapshots", "✅ forget"]
        .iter()
        .map(|heading| text.find(heading).expect(heading))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", text);

    assert!(text.contains("  Files: 5 new, 2 changed, 100 unmodified\n"));
    assert!(text.contains("  Data added: 1.5 KB (1.0 KB packed)\n"));
    assert!(text.contains("  Duration: 12.50 seconds\n"));
    assert!(text.contains("  Status: PASSED (0 errors)\n"));
    assert!(text.contains("Repository Snapshots: 2\n"));
    assert!(text.contains(
        "Date & Time          |      New | Modified |  Total Files |   Added Size |   Total Size\n"
    ));
    assert!(text.find("2025-01-02 00:00").unwrap() < text.find("2025-01-01 00:00").unwrap());
    assert!(text.contains("  1 snapshots removed\n"));
}

#[test]
fn report_is_deterministic() {
    let temp_dir = pipeline_dir();

    let first = restic_kit()
        .arg("report")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    let second = restic_kit()
        .arg("report")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn report_failed_backup_still_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    write_artifact(dir, "backup.home", "1", BACKUP_OUT, 20);
    write_artifact(dir, "check", "0", CHECK_OUT, 10);

    restic_kit()
        .arg("report")
        .arg(dir)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Overall Status: FAILURE\n"))
        .stdout(predicate::str::contains("❌ backup home\n"))
        .stdout(predicate::str::contains("  Files: 5 new, 2 changed, 100 unmodified\n"));
}

#[test]
fn report_missing_output_file_is_error() {
    let temp_dir = pipeline_dir();
    fs::remove_file(temp_dir.path().join("check.out")).unwrap();

    restic_kit()
        .arg("report")
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("check.out"));
}

#[test]
fn report_invalid_exit_code_is_error() {
    let temp_dir = pipeline_dir();
    fs::write(temp_dir.path().join("check.exitcode"), "zero").unwrap();

    restic_kit()
        .arg("report")
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid exit code"));
}

#[test]
fn audit_flags_size_growth() {
    let temp_dir = pipeline_dir();

    restic_kit()
        .arg("audit")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("Audit FAILED: 1 checks failed\n"))
        .stdout(predicate::str::contains(
            "- size_growth: 20.0% change exceeds 20.0% threshold",
        ));
}

#[test]
fn audit_passes_with_higher_threshold() {
    let temp_dir = pipeline_dir();

    restic_kit()
        .args(["audit", "--grow-threshold", "25"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout("Audit PASSED: All checks successful\n");
}

#[test]
fn audit_reads_config_from_env() {
    let temp_dir = pipeline_dir();
    let config_path = temp_dir.path().join("audit.json");
    fs::write(
        &config_path,
        r#"{"grow_threshold": 50.0, "retention": {"keep_daily": 1}}"#,
    )
    .unwrap();

    restic_kit()
        .env("RESTIC_KIT_CONFIG", &config_path)
        .arg("audit")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("- retention_daily: too many daily snapshots: 2 > 1"))
        .stdout(predicate::str::contains("size_growth").not());
}

#[test]
fn audit_rejects_negative_threshold() {
    let temp_dir = pipeline_dir();

    restic_kit()
        .args(["audit", "--shrink-threshold", "-1"])
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("shrink-threshold must be non-negative"));
}

#[test]
fn audit_json_output() {
    let temp_dir = pipeline_dir();

    let output = restic_kit()
        .args(["audit", "--format", "json"])
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["verdict"], "FAILED");
    assert_eq!(value["snapshot_count"], 2);
    assert_eq!(value["violations"][0]["check_type"], "size_growth");
    assert_eq!(value["violations"][0]["path"], "/home");
}

#[test]
fn audit_csv_output() {
    let temp_dir = pipeline_dir();

    restic_kit()
        .args(["audit", "--format", "csv"])
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("check_type,path,message,details\nsize_growth,/home,"));
}

#[test]
fn audit_of_missing_directory_is_error() {
    let temp_dir = TempDir::new().unwrap();

    restic_kit()
        .arg("audit")
        .arg(temp_dir.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Discovery error"));
}

#[test]
fn audit_without_snapshots_artifact_is_error() {
    let temp_dir = TempDir::new().unwrap();
    write_artifact(temp_dir.path(), "check", "0", CHECK_OUT, 10);

    restic_kit()
        .arg("audit")
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no snapshots artifact to audit"));
}
