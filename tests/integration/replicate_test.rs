//! CLI tests for the default replication command

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
fn test_default_run_uses_fixed_layout() {
    let work = tempdir().unwrap();
    let clash = work.path().join("ios_rule_script/rule/Clash");
    write(&clash.join("Apple/Apple.list"), "DOMAIN,apple.com\n");
    write(&clash.join("Apple/README.md"), "# Apple\n");
    write(&work.path().join("Egern/Old/Old.yaml"), "stale\n");

    let (stdout, stderr, success) = run_rulesync(work.path(), &[]);

    assert!(success, "Command should succeed: stderr={}", stderr);
    assert_eq!(stdout.trim(), "All Ruleset Processed!");
    assert_eq!(
        fs::read_to_string(work.path().join("Egern/Apple/Apple.yaml")).unwrap(),
        "DOMAIN,apple.com\n"
    );
    assert_eq!(
        fs::read_to_string(work.path().join("Singbox/Apple/Apple.json")).unwrap(),
        "DOMAIN,apple.com\n"
    );
    assert!(!work.path().join("Egern/Old").exists());
    assert!(!work.path().join("Egern/Apple/README.yaml").exists());
}

#[test]
fn test_missing_source_warns_but_succeeds() {
    let work = tempdir().unwrap();

    let (stdout, stderr, success) = run_rulesync(work.path(), &[]);

    assert!(success, "Lenient run should succeed: stderr={}", stderr);
    assert!(stdout.contains("All Ruleset Processed!"));
    assert!(stderr.contains("does not exist"), "Should warn: {}", stderr);
    assert!(work.path().join("Egern").is_dir());
    assert!(work.path().join("Singbox").is_dir());
}

#[test]
fn test_strict_source_fails_without_completion_message() {
    let work = tempdir().unwrap();

    let (stdout, stderr, success) = run_rulesync(work.path(), &["--strict-source"]);

    assert!(!success);
    assert!(!stdout.contains("All Ruleset Processed!"));
    assert!(stderr.contains("✗"), "Should report error: {}", stderr);
    assert!(!work.path().join("Egern").exists());
}

#[test]
fn test_custom_destinations_and_json_stats() {
    let work = tempdir().unwrap();
    write(&work.path().join("rules/a/b/rule1.txt"), "one\n");
    write(&work.path().join("rules/c/rule2.txt"), "two\n");

    let (stdout, stderr, success) = run_rulesync(
        work.path(),
        &[
            "--source",
            "rules",
            "--suffix",
            ".txt",
            "--dest",
            "out/yaml=.yaml",
            "--dest",
            "out/json=.json",
            "--stats",
            "--stats-format",
            "json",
        ],
    );

    assert!(success, "Command should succeed: stderr={}", stderr);
    assert!(work.path().join("out/yaml/a/b/rule1.yaml").exists());
    assert!(work.path().join("out/json/c/rule2.json").exists());

    let json_start = stdout.find('{').expect("stats JSON in stdout");
    let stats: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(stats["files_matched"], 2);
    assert_eq!(stats["files_written"], 4);
    assert_eq!(stats["bytes_copied"], 16);
}

#[test]
fn test_quiet_suppresses_completion_message() {
    let work = tempdir().unwrap();
    write(&work.path().join("ios_rule_script/rule/Clash/A.list"), "x\n");

    let (stdout, _, success) = run_rulesync(work.path(), &["--quiet", "--stats"]);

    assert!(success);
    assert!(stdout.is_empty(), "Quiet run should print nothing: {}", stdout);
}

#[test]
fn test_quiet_suppresses_json_stats() {
    let work = tempdir().unwrap();
    write(&work.path().join("ios_rule_script/rule/Clash/A.list"), "x\n");

    let (stdout, _, success) =
        run_rulesync(work.path(), &["--quiet", "--stats", "--stats-format", "json"]);

    assert!(success);
    assert!(stdout.is_empty(), "Quiet run should print nothing: {}", stdout);
    assert!(work.path().join("Egern/A.yaml").exists());
}

#[test]
fn test_destination_file_blocks_reset() {
    let work = tempdir().unwrap();
    write(&work.path().join("ios_rule_script/rule/Clash/A.list"), "x\n");
    write(&work.path().join("Egern"), "not a directory");

    let (stdout, stderr, success) = run_rulesync(work.path(), &[]);

    assert!(!success);
    assert!(!stdout.contains("All Ruleset Processed!"));
    assert!(stderr.contains("not a directory"), "stderr={}", stderr);
}

#[test]
fn test_overlapping_destination_is_rejected() {
    let work = tempdir().unwrap();
    write(&work.path().join("rules/A.list"), "x\n");

    let (_, stderr, success) = run_rulesync(work.path(), &["--source", "rules", "--dest", "rules=.yaml"]);

    assert!(!success);
    assert!(stderr.contains("Invalid configuration"), "stderr={}", stderr);
    assert!(work.path().join("rules/A.list").exists());
}
