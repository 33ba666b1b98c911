use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tsort() -> Command {
    let mut cmd = Command::cargo_bin("tsort").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_sorts_stdin() {
    tsort()
        .write_stdin("a b\nb c\n")
        .assert()
        .success()
        .stdout("a\nb\nc\n")
        .stderr("");
}

#[test]
fn test_empty_input() {
    tsort().write_stdin("").assert().success().stdout("");
}

#[test]
fn test_self_loop() {
    tsort().write_stdin("x x\n").assert().success().stdout("x\n");
}

#[test]
fn test_diamond() {
    tsort()
        .write_stdin("a b\na c\nb d\nc d\n")
        .assert()
        .success()
        .stdout("a\nc\nb\nd\n");
}

#[test]
fn test_dash_reads_stdin() {
    tsort()
        .arg("-")
        .write_stdin("2 1\n")
        .assert()
        .success()
        .stdout("2\n1\n");
}

#[test]
fn test_reads_file_operand() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("deps.txt");
    fs::write(&path, "3 8\n3 10\n5 11\n7 8\n7 11\n8 9\n11 2\n11 9\n11 10\n").unwrap();

    tsort()
        .arg(&path)
        .assert()
        .success()
        .stdout("3\n5\n7\n11\n8\n10\n2\n9\n");
}

#[test]
fn test_loop_is_reported_and_output_completed() {
    tsort()
        .write_stdin("a b\nb a\n")
        .assert()
        .failure()
        .code(1)
        .stdout("a\nb\n")
        .stderr(predicate::str::contains("tsort: input contains a loop:"))
        .stderr(predicate::str::contains("tsort: a\n"))
        .stderr(predicate::str::contains("tsort: b\n"));
}

#[test]
fn test_three_node_loop() {
    let assert = tsort().write_stdin("a b\nb c\nc a\n").assert().failure();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort();
    assert_eq!(lines, vec!["a", "b", "c"]);
}

#[test]
fn test_odd_token_count_is_fatal() {
    tsort()
        .write_stdin("a b c")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("odd number of tokens"));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent");

    tsort()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("tsort: "))
        .stderr(predicate::str::contains("absent"));
}

#[test]
fn test_extra_operand() {
    tsort().args(["one", "two"]).assert().failure().stdout("");
}

#[test]
fn test_version_flags() {
    for flag in ["-v", "-V", "--version"] {
        tsort()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("tsort"));
    }
}

#[test]
fn test_help() {
    tsort()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("standard input"));
}
