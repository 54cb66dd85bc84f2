use crate::commands::{tessera, workspace};
use predicates::prelude::*;

#[test]
fn test_cli_save_then_compile_stored() {
    let dir = workspace();

    tessera(dir.path())
        .arg("save")
        .arg(dir.path().join("tree.json"))
        .assert()
        .success();

    tessera(dir.path())
        .arg("compile")
        .assert()
        .success()
        .stdout(predicate::str::contains("(goal\n  (find \"bee\"))"));
}

#[test]
fn test_cli_load_prints_tree() {
    let dir = workspace();

    tessera(dir.path())
        .arg("save")
        .arg(dir.path().join("tree.json"))
        .assert()
        .success();

    tessera(dir.path())
        .arg("load")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signature\": \"has_count\""));

    tessera(dir.path())
        .arg("load")
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("fact 1"))
        .stdout(predicate::str::contains("species=\"bee\""));
}

#[test]
fn test_cli_clear_then_load_is_not_an_error() {
    let dir = workspace();

    tessera(dir.path())
        .arg("save")
        .arg(dir.path().join("tree.json"))
        .assert()
        .success();

    tessera(dir.path()).arg("clear").assert().success();
    tessera(dir.path()).arg("clear").assert().success();

    tessera(dir.path())
        .arg("load")
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing stored"));
}

#[test]
fn test_cli_compile_without_stored_tree() {
    let dir = workspace();

    tessera(dir.path())
        .arg("compile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No stored tree"));
}
