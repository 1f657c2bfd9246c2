//! Integration tests for the list command

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::starmark_cmd;

fn init(temp: &TempDir) {
    starmark_cmd().arg("init").arg(temp.path()).assert().success();
}

fn observe(temp: &TempDir, json: &str) {
    starmark_cmd()
        .current_dir(temp.path())
        .arg("observe")
        .write_stdin(json)
        .assert()
        .success();
}

fn seed(temp: &TempDir) {
    observe(
        temp,
        r#"[{"id": "1", "name": "alice/parser", "lang": "Rust", "stars": 10,
             "isCurrentlyStarred": true},
            {"id": "2", "name": "bob/linter", "lang": "Go", "stars": 5,
             "isCurrentlyStarred": true}]"#,
    );
}

#[test]
fn test_list_empty_cache() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    starmark_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No repositories found"));
}

#[test]
fn test_list_shows_all_sorted_by_slug() {
    let temp = TempDir::new().unwrap();
    init(&temp);
    seed(&temp);

    let output = starmark_cmd()
        .current_dir(temp.path())
        .arg("list")
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("alice/parser"));
    assert!(lines[1].contains("bob/linter"));
}

#[test]
fn test_list_filters_by_tag() {
    let temp = TempDir::new().unwrap();
    init(&temp);
    seed(&temp);

    starmark_cmd()
        .current_dir(temp.path())
        .arg("tag")
        .arg("1")
        .arg("favorite")
        .assert()
        .success();

    starmark_cmd()
        .current_dir(temp.path())
        .arg("list")
        .arg("--tag")
        .arg("favorite")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice/parser"))
        .stdout(predicate::str::contains("#favorite"))
        .stdout(predicate::str::contains("bob/linter").not());
}

#[test]
fn test_list_filters_by_language_and_query() {
    let temp = TempDir::new().unwrap();
    init(&temp);
    seed(&temp);

    starmark_cmd()
        .current_dir(temp.path())
        .arg("list")
        .arg("--lang")
        .arg("go")
        .assert()
        .success()
        .stdout(predicate::str::contains("bob/linter"))
        .stdout(predicate::str::contains("alice/parser").not());

    starmark_cmd()
        .current_dir(temp.path())
        .arg("list")
        .arg("--query")
        .arg("PARSER")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice/parser"))
        .stdout(predicate::str::contains("bob/linter").not());
}

#[test]
fn test_list_includes_repositories_from_earlier_visits() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    // Two separate page visits, each observing a different page of results
    observe(
        &temp,
        r#"{"id": "1", "name": "alice/parser", "isCurrentlyStarred": true}"#,
    );
    observe(
        &temp,
        r#"{"id": "2", "name": "bob/linter", "isCurrentlyStarred": true}"#,
    );

    starmark_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice/parser"))
        .stdout(predicate::str::contains("bob/linter"));
}

#[test]
fn test_list_excludes_pending_repositories() {
    let temp = TempDir::new().unwrap();
    init(&temp);
    seed(&temp);

    starmark_cmd()
        .current_dir(temp.path())
        .arg("unstar")
        .arg("2")
        .assert()
        .success();

    starmark_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice/parser"))
        .stdout(predicate::str::contains("bob/linter").not());
}
