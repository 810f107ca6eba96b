//! CLI tests for the Egern and sing-box convert commands

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn run_rulesync(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_rulesync"))
        .current_dir(dir)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run rulesync");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    (stdout, stderr, output.status.success())
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_replicate_then_convert_both_platforms() {
    let work = tempdir().unwrap();
    write(
        &work.path().join("ios_rule_script/rule/Clash/Apple/Apple.list"),
        "DOMAIN,apple.com\nIP-CIDR,17.0.0.0/8,no-resolve\n",
    );

    let (_, stderr, success) = run_rulesync(work.path(), &[]);
    assert!(success, "replicate failed: {}", stderr);

    let (stdout, stderr, success) = run_rulesync(work.path(), &["Egern", "Egern"]);
    assert!(success, "egern failed: {}", stderr);
    assert!(stdout.contains("Processed (Egern): Egern/Apple/Apple.yaml"), "stdout={}", stdout);
    assert!(stdout.trim_end().ends_with("Processed Completed."));

    let (stdout, stderr, success) = run_rulesync(work.path(), &["singbox", "Singbox"]);
    assert!(success, "singbox failed: {}", stderr);
    assert!(stdout.contains("Processed (Singbox): Singbox/Apple/Apple.json"));

    assert_eq!(
        fs::read_to_string(work.path().join("Egern/Apple/Apple.yaml")).unwrap(),
        "# 规则名称: Apple\n# 规则统计: 2\n\nno_resolve: true\n\
         domain_set:\n  - apple.com\nip_cidr_set:\n  - 17.0.0.0/8\n"
    );
    assert_eq!(
        fs::read_to_string(work.path().join("Egern/Apple/readme.md")).unwrap(),
        "# 🧸 Apple\n\nhttps://raw.githubusercontent.com/Centralmatrix3/Ruleset/master/Egern/Apple/Apple.yaml"
    );

    let singbox: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(work.path().join("Singbox/Apple/Apple.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(singbox["version"], 3);
    assert_eq!(singbox["rules"][1]["ip_cidr"][0], "17.0.0.0/8");
}

#[test]
fn test_convert_missing_path_fails() {
    let work = tempdir().unwrap();

    let (_, stderr, success) = run_rulesync(work.path(), &["egern", "Nowhere"]);

    assert!(!success);
    assert!(stderr.contains("Nowhere not found or unsupported type."), "stderr={}", stderr);
}

#[test]
fn test_convert_empty_directory_succeeds() {
    let work = tempdir().unwrap();
    fs::create_dir_all(work.path().join("Egern")).unwrap();

    let (stdout, _, success) = run_rulesync(work.path(), &["egern", "Egern"]);

    assert!(success);
    assert!(stdout.contains("No files found in: Egern"));
}

#[test]
fn test_convert_reports_failures_and_continues() {
    let work = tempdir().unwrap();
    write(&work.path().join("Singbox/Good/Good.json"), "DOMAIN,good.com\n");
    // Invalid UTF-8 cannot be parsed as a rule list
    let bad = work.path().join("Singbox/Bad/Bad.json");
    fs::create_dir_all(bad.parent().unwrap()).unwrap();
    fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();

    let (stdout, stderr, success) = run_rulesync(work.path(), &["singbox", "Singbox"]);

    assert!(!success);
    assert!(stderr.contains("Failed to process Singbox/Bad/Bad.json"), "stderr={}", stderr);
    assert!(stdout.contains("Processed (Singbox): Singbox/Good/Good.json"));
    assert!(stdout.contains("Processed Completed."));
    assert!(stderr.contains("1 of 2 files failed"));
}
