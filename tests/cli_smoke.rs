//! CLI binary smoke tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    Command::cargo_bin("conlearn").unwrap()
}

/// Link-only spam: every spam mail has a link, no ham mail does.
fn mailbox_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "has_link,has_attachment,is_spam").unwrap();
    for _ in 0..10 {
        writeln!(file, "1,0,1\n1,1,1\n0,0,0\n0,1,0").unwrap();
    }
    file
}

#[test]
fn no_args_shows_usage() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("conlearn"));
}

#[test]
fn learns_rule_from_csv() {
    let file = mailbox_file();
    cmd()
        .arg(file.path())
        .args(["--label", "is_spam", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule: has_link = 1"))
        .stdout(predicate::str::is_match(r"Accuracy\s+1\.0000").unwrap());
}

#[test]
fn show_test_prints_prediction_column() {
    let file = mailbox_file();
    cmd()
        .arg(file.path())
        .args(["-l", "is_spam", "-s", "1", "--show-test", "--prediction-column", "predicted_spam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has_link\thas_attachment\tis_spam\tpredicted_spam"));
}

#[test]
fn single_class_test_split_prints_undefined_metrics() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "has_link,has_attachment,is_spam").unwrap();
    writeln!(file, "1,0,1\n1,1,1\n1,0,1\n1,1,1\n1,0,1").unwrap();
    cmd()
        .arg(file.path())
        .args(["--label", "is_spam", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"True negative rate\s+undefined \(").unwrap());
}

#[test]
fn missing_label_column_fails() {
    let file = mailbox_file();
    cmd()
        .arg(file.path())
        .args(["--label", "spam"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Label column 'spam' is not in the dataset"));
}

#[test]
fn missing_file_fails() {
    cmd()
        .args(["/definitely/not/here.csv", "--label", "is_spam"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dataset"));
}

#[test]
fn invalid_test_size_fails() {
    let file = mailbox_file();
    cmd()
        .arg(file.path())
        .args(["--label", "is_spam", "--test-size", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test fraction must be in (0, 1)"));
}
