use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_tracelens")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_summary() {
    let assert = cmd()
        .args(["-f", "summary"])
        .write_stdin("Error: Cannot read property 'foo' of undefined at src/app.js:42:7")
        .assert()
        .success();
    assert_eq!(
        stdout_of(&assert),
        "Error in src/app.js at line 42, column 7: Cannot read property 'foo' of undefined\n"
    );
}

#[test]
fn stdin_empty_input() {
    cmd()
        .args(["-f", "summary"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("Unknown error format\n");
}

#[test]
fn stdin_text_is_uncolored_when_piped() {
    let assert = cmd()
        .write_stdin("Cannot find module 'lodash'\n")
        .assert()
        .success();
    let out = stdout_of(&assert);
    assert!(out.contains("Missing module: lodash"), "got: {out}");
    assert!(out.contains("Missing Module: 1"), "got: {out}");
    assert!(!out.contains('\x1b'), "got: {out}");
}

#[test]
fn stdin_json() {
    let input = std::fs::read_to_string(fixture_path("node.log")).unwrap();
    let assert = cmd()
        .args(["-f", "json"])
        .write_stdin(input)
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(value["source"], Value::Null);
    let labels: Vec<_> = value["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["Error Location", "Stack Entry"]);
    assert_eq!(value["results"][1]["matches"].as_array().unwrap().len(), 2);
    assert_eq!(
        value["results"][1]["matches"][1]["groups"][0],
        "processChild"
    );
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "yaml"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: yaml"));
}

// -- file mode --

#[test]
fn file_mode_prints_each_report() {
    let assert = cmd()
        .args(["-f", "summary"])
        .arg(fixture_path("plain.log"))
        .arg(fixture_path("tsc.log"))
        .assert()
        .success();
    assert_eq!(
        stdout_of(&assert),
        "make: *** [all] Error 2\n\n\
         src/components/Header.tsx:8:3 - error TS2322: Type 'string' is not assignable to type 'number'.\n\
         Missing module: ./missing\n\
         Type 'string' is not assignable to type 'number'\n"
    );
}

#[test]
fn file_mode_writes_output_dir() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-f", "html", "-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("node.log"))
        .arg(fixture_path("tsc.log"))
        .assert()
        .success();

    let node = std::fs::read_to_string(dir.path().join("node.html")).unwrap();
    assert!(node.contains("title=\"Stack Entry\""));
    assert!(node.contains("<li>Stack: renderList in /srv/app/src/List.js at line 14</li>"));
    assert!(dir.path().join("tsc.html").exists());
}

#[test]
fn file_mode_directory_input() {
    let assert = cmd()
        .args(["-f", "summary"])
        .arg(format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR")))
        .assert()
        .success();
    let out = stdout_of(&assert);
    assert!(out.contains("make: *** [all] Error 2"), "got: {out}");
    assert!(out.contains("Missing module: ./missing"), "got: {out}");
}

#[test]
fn file_mode_unmatched_glob_warns() {
    cmd()
        .args(["-f", "summary"])
        .arg(format!("{}/tests/fixtures/*.nothing", env!("CARGO_MANIFEST_DIR")))
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no files matched"));
}

// -- issue mode --

#[test]
fn issue_mode_refreshes_error_pattern() {
    let assert = cmd()
        .arg("--issues")
        .arg(fixture_path("issues.json"))
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    let issues = value.as_array().unwrap();
    assert_eq!(issues.len(), 3);
    assert_eq!(
        issues[0]["error_pattern"],
        "Error in src/app.js at line 42, column 7: Cannot read property 'foo' of undefined"
    );
    assert_eq!(issues[0]["projects"]["clients"]["name"], "Acme");
    assert_eq!(issues[1]["error_pattern"], "Missing module: lodash");
    assert_eq!(issues[2]["error_pattern"], Value::Null);
}

#[test]
fn issue_mode_recent() {
    let input = std::fs::read_to_string(fixture_path("issues.json")).unwrap();
    let assert = cmd()
        .args(["--issues", "--recent", "5"])
        .write_stdin(input)
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    let ids: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["b2", "b1"]);
}

#[test]
fn issue_mode_rejects_bad_json() {
    cmd()
        .arg("--issues")
        .write_stdin("{ nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse stdin"));
}

#[test]
fn issue_mode_recent_default_limit() {
    let input = std::fs::read_to_string(fixture_path("issues.json")).unwrap();
    let assert = cmd()
        .args(["--issues", "--recent"])
        .write_stdin(input)
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn issue_mode_shared_only() {
    let assert = cmd()
        .args(["--issues", "--shared"])
        .arg(fixture_path("issues.json"))
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    let issues = value.as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["id"], "b1");
}

#[test]
fn issue_mode_keeps_partial_records_partial() {
    let assert = cmd()
        .arg("--issues")
        .write_stdin(r#"{"id":"x","title":"t","error_trace":"Cannot find module 'a'","created_at":"2024-01-01"}"#)
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": "x",
            "title": "t",
            "error_trace": "Cannot find module 'a'",
            "error_pattern": "Missing module: a",
            "created_at": "2024-01-01"
        }])
    );
}
