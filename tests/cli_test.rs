use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn reporank(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("reporank").unwrap();
    cmd.current_dir(dir)
        .env_remove("REPORANK_INDEX_PATH")
        .env_remove("REPORANK_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_action_prints_usage_hint() {
    let dir = tempfile::tempdir().unwrap();
    reporank(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please specify an action: --setup, --question, or --evaluate",
        ));
}

#[test]
fn test_question_without_index_fails() {
    let dir = tempfile::tempdir().unwrap();
    reporank(dir.path())
        .args(["--question", "where is the main loop?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index not found"));
}

#[test]
fn test_evaluate_without_index_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("data.json"), "[]").unwrap();
    reporank(dir.path())
        .args(["--evaluate", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("index not found"));
}

#[test]
fn test_bad_chunking_config_is_rejected_before_setup() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("reporank.toml"),
        "[chunking]\nchunk_size = 100\noverlap = 100\n",
    )
    .unwrap();

    reporank(dir.path())
        .args(["--setup", "https://example.invalid/team/project.git"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid chunking"));
    assert!(!dir.path().join(".reporank").exists());
}

#[test]
fn test_actions_are_mutually_exclusive() {
    let dir = tempfile::tempdir().unwrap();
    reporank(dir.path())
        .args(["--question", "q", "--evaluate", "data.json"])
        .assert()
        .failure();
}
