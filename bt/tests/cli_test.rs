//! Binary-level tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_missing_api_key_exits_nonzero() {
    let home = TempDir::new().unwrap();

    Command::cargo_bin("bt")
        .unwrap()
        .env_remove("OPENAI_API_KEY")
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .current_dir(home.path())
        .args(["-p", "a story about a shy turtle who learns to sing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"))
        .stdout(predicate::str::contains("FINAL STORY").not());
}

#[test]
fn test_bad_config_path_exits_nonzero() {
    let home = TempDir::new().unwrap();

    Command::cargo_bin("bt")
        .unwrap()
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path())
        .current_dir(home.path())
        .args(["--config", "missing.yml", "-p", "a turtle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_help_lists_prompt_flag() {
    Command::cargo_bin("bt")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prompt"))
        .stdout(predicate::str::contains("--max-feedback-revisions"));
}
