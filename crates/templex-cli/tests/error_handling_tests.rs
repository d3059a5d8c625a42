//! Tests for error handling and suggestions.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn copy_without_destination_fails_with_usage() {
    let mut cmd = Command::cargo_bin("templex").unwrap();
    cmd.args(["copy", "gh:org/template"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DESTINATION"));
}

#[test]
fn malformed_data_argument_suggests_key_value_separator() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("templex").unwrap();
    cmd.args(["copy", "./missing-template", "dest", "--data", "nokeyvalue"])
        .current_dir(temp.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn update_without_answers_file_reports_missing_file() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("templex").unwrap();
    cmd.arg("update").current_dir(temp.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("answers file"));
}
