use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn jargo_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jargo").unwrap();
    cmd.env("JARGO_HOME", home).env_remove("RUST_LOG");
    cmd
}

fn empty_project(dir: &Path) {
    fs::write(
        dir.join("Jargo.toml"),
        "[package]\nname = \"tree-test\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();
}

#[test]
fn test_tree_without_graph_fails() {
    let tmp = TempDir::new().unwrap();
    empty_project(tmp.path());

    jargo_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dependency graph on record"))
        .stderr(predicate::str::contains("jargo update"));
}

#[test]
fn test_tree_after_build_of_empty_project() {
    let tmp = TempDir::new().unwrap();
    empty_project(tmp.path());

    jargo_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["build"])
        .assert()
        .success();

    jargo_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies."));
}

#[test]
fn test_tree_prints_stored_graph() {
    let tmp = TempDir::new().unwrap();
    empty_project(tmp.path());
    let deps = tmp.path().join(".jargo/deps");
    fs::create_dir_all(&deps).unwrap();
    fs::write(
        deps.join("dependency-graph.json"),
        r#"{
  "vertices": [
    {"id": 0, "artifact": {"group_id": "org.slf4j", "artifact_id": "slf4j-simple", "version": "1.7.25"}},
    {"id": 1, "artifact": {"group_id": "org.slf4j", "artifact_id": "slf4j-api", "version": "1.7.25"}}
  ],
  "edges": [[0, 1]]
}"#,
    )
    .unwrap();

    jargo_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .success()
        .stdout("+ org.slf4j:slf4j-simple:1.7.25\n| + org.slf4j:slf4j-api:1.7.25\n");
}

#[test]
fn test_tree_corrupt_graph_fails() {
    let tmp = TempDir::new().unwrap();
    empty_project(tmp.path());
    let deps = tmp.path().join(".jargo/deps");
    fs::create_dir_all(&deps).unwrap();
    fs::write(deps.join("dependency-graph.json"), "{ not json").unwrap();

    jargo_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("persistence failed"));
}
