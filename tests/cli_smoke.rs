use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn ccinfo_bin() -> &'static str {
    env!("CARGO_BIN_EXE_ccinfo")
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("failed to write test file");
}

#[test]
fn cli_prints_summary_for_basic_run() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    write_file(&temp_dir.path().join("a.py"), "# comment\n\nx = 1\n");

    let output = Command::new(ccinfo_bin())
        .arg("--no-color")
        .arg(temp_dir.path())
        .output()
        .expect("failed to execute ccinfo");

    assert!(
        output.status.success(),
        "expected success, got status {:?}, stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Files source:"),
        "stdout missing sources line: {stdout}"
    );
    assert!(
        stdout.contains("Processed files: 1"),
        "stdout missing processed count: {stdout}"
    );
    assert!(
        stdout.contains("Language"),
        "stdout missing table header: {stdout}"
    );
    assert!(
        stdout.contains("python"),
        "stdout missing python totals: {stdout}"
    );
}

#[test]
fn cli_without_arguments_prints_usage() {
    let output = Command::new(ccinfo_bin())
        .output()
        .expect("failed to execute ccinfo");

    assert!(
        output.status.success(),
        "usage should not be an error, status: {:?}",
        output.status.code()
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout missing usage: {stdout}");
}

#[test]
fn cli_missing_path_is_a_diagnostic_not_a_failure() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let missing_path = temp_dir.path().join("missing");
    write_file(&temp_dir.path().join("b.go"), "package b\n");

    let output = Command::new(ccinfo_bin())
        .arg("--no-color")
        .arg(&missing_path)
        .arg(temp_dir.path().join("b.go"))
        .output()
        .expect("failed to execute ccinfo");

    assert!(
        output.status.success(),
        "missing paths must not fail the run, status: {:?}",
        output.status.code()
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not exist"),
        "stderr did not mention missing path: {stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Skipped files: 1"),
        "missing path should be skipped: {stdout}"
    );
    assert!(stdout.contains("go"), "stdout missing go totals: {stdout}");
}

#[test]
fn cli_undecodable_file_is_reported_and_run_continues() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    fs::write(temp_dir.path().join("bad.cpp"), b"int x;\n\xff\xfe\n")
        .expect("failed to write binary file");
    write_file(&temp_dir.path().join("good.cpp"), "// ok\nint y;\n");

    let output = Command::new(ccinfo_bin())
        .arg("--no-color")
        .arg(temp_dir.path())
        .output()
        .expect("failed to execute ccinfo");

    assert!(
        output.status.success(),
        "per-file failures must not fail the run, status: {:?}",
        output.status.code()
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("bad.cpp"),
        "stderr should name the failing file: {stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Warning: 1 path(s) could not be counted"),
        "stdout should warn about the failure: {stdout}"
    );
}

#[test]
fn cli_invalid_filespec_pattern_errors() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    write_file(&temp_dir.path().join("a.py"), "x = 1\n");

    let output = Command::new(ccinfo_bin())
        .arg(temp_dir.path())
        .arg("--filespec")
        .arg("[")
        .output()
        .expect("failed to execute ccinfo");

    assert!(
        !output.status.success(),
        "invalid filespec should fail, status: {:?}",
        output.status.code()
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid filespec pattern"),
        "stderr missing filespec error: {stderr}"
    );
}

#[test]
fn cli_verbose_lists_each_file() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    write_file(&temp_dir.path().join("a.js"), "// c\nlet a = 1;\n");
    write_file(&temp_dir.path().join("notes.txt"), "plain\n");

    let output = Command::new(ccinfo_bin())
        .arg("--no-color")
        .arg("--verbose")
        .arg(temp_dir.path())
        .output()
        .expect("failed to execute ccinfo");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Per-file breakdown:"),
        "verbose mode should list files: {stdout}"
    );
    assert!(stdout.contains("a.js"), "stdout missing a.js: {stdout}");
    assert!(
        stdout.contains("unsupported"),
        "stdout missing skipped file: {stdout}"
    );
}
