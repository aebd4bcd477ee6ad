//! CLI tests for the ks binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ks(dir: &TempDir, backend: &str) -> Command {
    let mut cmd = Command::cargo_bin("ks").unwrap();
    cmd.arg("--backend").arg(backend).arg("--path").arg(dir.path());
    cmd
}

#[test]
fn test_set_get_delete_file_backend() {
    let dir = TempDir::new().unwrap();

    ks(&dir, "file")
        .args(["set", "tripChecklist-Goa", r#"[{"id":1,"text":"Sunscreen","completed":false}]"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored"));

    ks(&dir, "file")
        .args(["get", "tripChecklist-Goa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunscreen"));

    ks(&dir, "file")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("tripChecklist-Goa"));

    ks(&dir, "file")
        .args(["delete", "tripChecklist-Goa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));
}

#[test]
fn test_set_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    ks(&dir, "sqlite").args(["set", "savedTrips", "{oops"]).assert().failure();
}

#[test]
fn test_list_empty() {
    let dir = TempDir::new().unwrap();
    ks(&dir, "sqlite")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No keys found"));
}
