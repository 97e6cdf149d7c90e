use std::process::Command;

fn ccinfo_bin() -> &'static str {
    env!("CARGO_BIN_EXE_ccinfo")
}

#[test]
fn cli_prints_supported_languages() {
    let output = Command::new(ccinfo_bin())
        .arg("--languages")
        .arg("--no-color")
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
        stdout.contains("Supported languages:"),
        "stdout missing 'Supported languages:' header: {stdout}"
    );
    for language in ["python", "javascript", "go", "cpp", "java"] {
        assert!(stdout.contains(language), "stdout missing {language}: {stdout}");
    }
    assert!(stdout.contains(".mod"), "stdout missing .mod: {stdout}");
}

#[test]
fn cli_languages_short_flag() {
    let output = Command::new(ccinfo_bin())
        .arg("-l")
        .output()
        .expect("failed to execute ccinfo");

    assert!(
        output.status.success(),
        "expected success with -l, got status {:?}, stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Supported languages:"),
        "stdout missing 'Supported languages:' header with -l: {stdout}"
    );
}
