use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn workspace_with_app() -> TempDir {
    let dir = TempDir::new().unwrap();
    let app = dir.path().join("app");
    fs::create_dir_all(&app).unwrap();
    fs::write(
        app.join("package.json"),
        r#"{"scripts": {"test": "jest", "build": "webpack"}}"#,
    )
    .unwrap();
    dir
}

fn scriptree() -> Command {
    Command::cargo_bin("scriptree").unwrap()
}

#[test]
fn test_list_prints_projects_and_scripts() {
    let dir = workspace_with_app();

    scriptree()
        .arg("list")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("app"))
        .stdout(predicate::str::contains("Test"))
        .stdout(predicate::str::contains("npm run test"))
        .stdout(predicate::str::contains("npm run build"));
}

#[test]
fn test_list_json() {
    let dir = workspace_with_app();

    let output = scriptree()
        .arg("list")
        .arg("--json")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed[0]["node"]["label"], "app");
    assert_eq!(parsed[0]["children"][0]["label"], "Test");
    assert_eq!(parsed[0]["children"][0]["invocation"], "npm run test");
}

#[test]
fn test_run_dry_run_uses_npm_by_default() {
    let dir = workspace_with_app();

    scriptree()
        .args(["run", "app", "build", "--dry-run"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("npm run build"));
}

#[test]
fn test_run_dry_run_honors_yarn_setting() {
    let dir = workspace_with_app();
    fs::write(
        dir.path().join(".scriptree.json"),
        r#"{"package_manager": "yarn"}"#,
    )
    .unwrap();

    scriptree()
        .args(["run", "app", "build", "--dry-run"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("yarn build"));
}

#[test]
fn test_run_unknown_project_fails() {
    let dir = workspace_with_app();

    scriptree()
        .args(["run", "nope", "build", "--dry-run"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project 'nope'"));
}

#[test]
fn test_run_unknown_script_fails() {
    let dir = workspace_with_app();

    scriptree()
        .args(["run", "app", "deploy", "--dry-run"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No script 'deploy'"));
}
