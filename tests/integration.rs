//! Integration tests for the dirtree binary


use std::fs;

use assert_cmd::Command;
use harness::{TestTree, run_dirtree, sample_tree};
use predicates::prelude::*;

#[test]
fn test_basic_text_output() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirtree(tree.path(), &["a"]);
    assert!(success, "dirtree should succeed");
    assert_eq!(stdout, "a/\r\n├── B/\r\n├── a.txt\r\n└── z.txt\r\n");
}

#[test]
fn test_absolute_path_argument() {
    let tree = sample_tree();
    let root = tree.root().to_str().unwrap().to_string();

    let (stdout, _stderr, success) = run_dirtree(tree.path(), &[&root]);
    assert!(success);
    assert!(stdout.starts_with("a/\r\n"), "root line should be the dir name: {stdout}");
}

#[test]
fn test_json_output_parses() {
    let tree = sample_tree();

    let (stdout, _stderr, success) = run_dirtree(tree.path(), &["a", "--format", "json"]);
    assert!(success);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(json["name"], "a");
    assert_eq!(json["type"], "directory");
    let children = json["children"].as_array().expect("root should have children");
    let names: Vec<_> = children.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["B", "a.txt", "z.txt"]);
    assert!(children[0].get("children").is_none(), "empty dir has no children key");
    assert_eq!(children[1]["type"], "file");
}

#[test]
fn test_xml_output() {
    let tree = sample_tree();

    Command::cargo_bin("dirtree")
        .unwrap()
        .current_dir(tree.path())
        .args(["a", "-f", "xml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
        ))
        .stdout(predicate::str::contains("<directory name=\"B\"></directory>"))
        .stdout(predicate::str::contains("<file name=\"z.txt\"/>"));
}

#[test]
fn test_missing_path_is_not_an_error() {
    let tree = TestTree::new();
    let missing = tree.path().join("missing");

    Command::cargo_bin("dirtree")
        .unwrap()
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "Path does not exist: {}\n",
            missing.display()
        )));
}

#[test]
fn test_level_limits_depth() {
    let tree = TestTree::named("root");
    tree.add_file("one/two/three.txt", "");

    let (stdout, _stderr, success) = run_dirtree(tree.path(), &["root", "-L", "1"]);
    assert!(success);
    assert_eq!(stdout, "root/\r\n└── one/\r\n");

    let (stdout, _stderr, success) = run_dirtree(tree.path(), &["root", "-L", "0"]);
    assert!(success);
    assert_eq!(stdout, "root/\r\n");
}

#[test]
fn test_negative_level_is_unlimited() {
    let tree = TestTree::named("root");
    tree.add_file("one/two/three.txt", "");

    let (stdout, _stderr, success) = run_dirtree(tree.path(), &["root", "-L", "-1"]);
    assert!(success);
    assert!(stdout.contains("three.txt"), "should reach the leaf: {stdout}");
}

#[test]
fn test_save_text_keeps_crlf() {
    let tree = sample_tree();

    let (stdout, stderr, success) = run_dirtree(tree.path(), &["a", "-o", "snapshot.txt"]);
    assert!(success, "save should succeed: {stderr}");
    assert!(stdout.is_empty(), "nothing printed when saving");
    assert!(stderr.contains("saved:"), "status line expected: {stderr}");

    let saved = fs::read_to_string(tree.path().join("snapshot.txt")).unwrap();
    assert_eq!(saved, "a/\r\n├── B/\r\n├── a.txt\r\n└── z.txt\r\n");
}

#[test]
fn test_save_format_from_extension() {
    let tree = sample_tree();

    let (_stdout, stderr, success) = run_dirtree(tree.path(), &["a", "-o", "snapshot.json"]);
    assert!(success, "save should succeed: {stderr}");

    let saved = fs::read_to_string(tree.path().join("snapshot.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["children"].as_array().unwrap().len(), 3);
}

#[test]
fn test_save_appends_missing_extension() {
    let tree = sample_tree();

    let (_stdout, stderr, success) =
        run_dirtree(tree.path(), &["a", "--format", "xml", "-o", "snapshot"]);
    assert!(success, "save should succeed: {stderr}");

    let saved = fs::read_to_string(tree.path().join("snapshot.xml")).unwrap();
    assert!(saved.starts_with("<?xml"));
    assert!(!tree.path().join("snapshot").exists());
}

#[test]
fn test_save_into_missing_directory_fails() {
    let tree = sample_tree();

    Command::cargo_bin("dirtree")
        .unwrap()
        .current_dir(tree.path())
        .env("NO_COLOR", "1")
        .args(["a", "-o", "no/such/dir/out.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("out.json"));
}

#[test]
fn test_progress_lines_on_stderr() {
    let tree = TestTree::named("root");
    for i in 0..25 {
        tree.add_file(&format!("file{i:02}.txt"), "");
    }

    let (stdout, stderr, success) = run_dirtree(tree.path(), &["root", "--progress"]);
    assert!(success);
    assert!(stderr.contains("progress: 10 processed"), "{stderr}");
    assert!(stderr.contains("progress: 20 processed"), "{stderr}");
    assert!(!stdout.contains("processed"));
}

#[test]
fn test_invalid_format_rejected() {
    let tree = sample_tree();
    Command::cargo_bin("dirtree")
        .unwrap()
        .current_dir(tree.path())
        .args(["a", "--format", "yaml"])
        .assert()
        .failure();
}
