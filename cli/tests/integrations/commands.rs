use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const LIBRARY: &str = r#"[
    {"name": "has_count", "kind": "Annotation", "params": [{"name": "n", "type": "Int"}]},
    {"name": "is_species", "kind": "Annotation", "params": [{"name": "species", "type": "Str"}]},
    {"name": "find", "kind": "Analysis", "params": [{"name": "species", "type": "Str"}]}
]"#;

pub const TREE: &str = r#"{
    "statements": [
        {"signature": "has_count", "values": {"n": 3}},
        {"signature": "is_species", "values": {"species": "bee"}}
    ],
    "goal": {"signature": "find", "values": {"species": "bee"}}
}"#;

pub fn tessera(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tessera").unwrap();
    cmd.arg("--catalogue")
        .arg(dir.join("signatures.json"))
        .arg("--store")
        .arg(dir.join("store"));
    cmd
}

pub fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("signatures.json"), LIBRARY).unwrap();
    fs::write(temp_dir.path().join("tree.json"), TREE).unwrap();
    temp_dir
}

#[test]
fn test_cli_compile_tree_file() {
    let dir = workspace();

    tessera(dir.path())
        .arg("compile")
        .arg(dir.path().join("tree.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "(facts\n  (has_count 3)\n  (is_species \"bee\"))\n\n(goal\n  (find \"bee\"))",
        ));
}

#[test]
fn test_cli_compile_incomplete_tree() {
    let dir = workspace();
    fs::write(
        dir.path().join("partial.json"),
        r#"{"statements": [{"signature": "has_count"}], "goal": {"signature": "find", "values": {"species": "bee"}}}"#,
    )
    .unwrap();

    tessera(dir.path())
        .arg("compile")
        .arg(dir.path().join("partial.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("'has_count' has no value for 'n'"));
}

#[test]
fn test_cli_compile_missing_goal() {
    let dir = workspace();
    fs::write(dir.path().join("nogoal.json"), r#"{"statements": []}"#).unwrap();

    tessera(dir.path())
        .arg("compile")
        .arg(dir.path().join("nogoal.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no goal"));
}

#[test]
fn test_cli_blocks() {
    let dir = workspace();

    tessera(dir.path())
        .arg("blocks")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"program\""))
        .stdout(predicate::str::contains("has_count\\nn: %1"))
        .stdout(predicate::str::contains("\"output\": \"Goal\""));
}

#[test]
fn test_cli_toolbox() {
    let dir = workspace();

    tessera(dir.path())
        .arg("toolbox")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Facts\""))
        .stdout(predicate::str::contains("\"name\": \"Goals\""));
}

#[test]
fn test_cli_list() {
    let dir = workspace();

    tessera(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("has_count"))
        .stdout(predicate::str::contains("species: text"))
        .stdout(predicate::str::contains("expression"));
}

#[test]
fn test_cli_bad_catalogue() {
    let dir = workspace();
    fs::write(
        dir.path().join("signatures.json"),
        r#"[{"name": "weigh", "kind": "Annotation", "params": [{"name": "g", "type": "Float"}]}]"#,
    )
    .unwrap();

    tessera(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown parameter type 'Float'"));
}

#[test]
fn test_cli_missing_catalogue() {
    let dir = TempDir::new().unwrap();

    tessera(dir.path())
        .arg("blocks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read catalogue"));
}

#[test]
fn test_cli_decompile() {
    let dir = workspace();
    fs::write(
        dir.path().join("program.txt"),
        "(facts\n  (has_count 7))\n\n(goal\n  (find \"wasp\"))",
    )
    .unwrap();

    tessera(dir.path())
        .arg("decompile")
        .arg(dir.path().join("program.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"n\": 7"))
        .stdout(predicate::str::contains("\"species\": \"wasp\""));
}

#[test]
fn test_cli_decompile_reports_location() {
    let dir = workspace();
    fs::write(
        dir.path().join("program.txt"),
        "(facts\n  (has_count \"seven\"))\n\n(goal\n  (find \"wasp\"))",
    )
    .unwrap();

    tessera(dir.path())
        .arg("decompile")
        .arg(dir.path().join("program.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("expects integer"));
}
