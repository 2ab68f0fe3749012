//! End-to-end tests driving the tagping binary against a temp data file.
//!
//! stdout is piped here, so the binary auto-selects JSON output; every
//! assertion below parses that.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

fn tagping(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tagping").unwrap();
    cmd.env_remove("TAGPING_DATA")
        .env_remove("TAGPING_USER")
        .env_remove("TAGPING_NAME")
        .arg("--data")
        .arg(data);
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be one JSON document")
}

#[test]
fn create_subscribe_list_delete_flow() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("tags.json");

    let out = tagping(&data)
        .args(["--user", "42", "--display-name", "alice"])
        .args(["create", "lunch", "midday", "crew"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let created = stdout_json(&out);
    assert_eq!(created["name"], "lunch");
    assert_eq!(created["creator_id"], 42);
    assert_eq!(created["description"], "midday crew");

    tagping(&data)
        .args(["--user", "7", "--display-name", "bob"])
        .args(["subscribe", "LUNCH"])
        .assert()
        .success();

    let out = tagping(&data).arg("list").output().unwrap();
    let listed = stdout_json(&out);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["tags"][0]["name"], "lunch");
    assert_eq!(listed["tags"][0]["subscriber_count"], 1);

    // Non-creator deletion is forbidden (exit 6)...
    tagping(&data)
        .args(["--user", "7", "delete", "lunch"])
        .assert()
        .failure()
        .code(6);

    // ...unless externally privileged.
    tagping(&data)
        .args(["--user", "7", "delete", "lunch", "--admin"])
        .assert()
        .success();

    let out = tagping(&data).arg("list").output().unwrap();
    assert_eq!(stdout_json(&out)["count"], 0);
}

#[test]
fn duplicate_create_reports_conflict() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("tags.json");

    tagping(&data)
        .args(["--user", "1", "create", "lunch"])
        .assert()
        .success();

    let out = tagping(&data)
        .args(["--user", "2", "create", "LUNCH"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(5));
    let err: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["error"]["code"], "DUPLICATE_TAG");
    assert_eq!(err["error"]["exit_code"], 5);
}

#[test]
fn mutation_without_user_is_rejected() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("tags.json");

    let out = tagping(&data).args(["create", "lunch"]).output().unwrap();
    assert_eq!(out.status.code(), Some(4));
    let err: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["error"]["code"], "INVALID_ARGUMENT");
}

#[test]
fn list_prunes_never_subscribed_tags() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("tags.json");

    tagping(&data)
        .args(["--user", "1", "create", "ghost"])
        .assert()
        .success();

    let out = tagping(&data).arg("list").output().unwrap();
    assert_eq!(stdout_json(&out)["count"], 0);

    // Pruned for real: a subsequent subscribe finds nothing.
    tagping(&data)
        .args(["--user", "7", "subscribe", "ghost"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn mention_resolves_only_known_handles() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("tags.json");

    tagping(&data)
        .args(["--user", "1", "create", "lunch"])
        .assert()
        .success();
    tagping(&data)
        .args(["--user", "7", "--display-name", "bob", "subscribe", "lunch"])
        .assert()
        .success();
    // No display name: subscribed but never mentionable.
    tagping(&data)
        .args(["--user", "8", "subscribe", "lunch"])
        .assert()
        .success();

    let out = tagping(&data)
        .args(["mention", "who", "is", "up", "for", "#lunch?"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let resolved = stdout_json(&out);
    assert_eq!(resolved["count"], 1);
    assert_eq!(resolved["groups"][0]["tag_name"], "lunch");
    assert_eq!(resolved["groups"][0]["handles"], serde_json::json!(["bob"]));
}

#[test]
fn first_run_migrates_legacy_file() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("tags.json");
    std::fs::write(
        &data,
        r#"{"tags":[{"name":"x","creator_id":1,"subscribers":[5,6]}]}"#,
    )
    .unwrap();

    let out = tagping(&data).arg("list").output().unwrap();
    assert!(out.status.success());
    let listed = stdout_json(&out);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["tags"][0]["subscriber_count"], 2);

    // Placeholder names are stored but never mentionable.
    let out = tagping(&data).args(["mention", "#x"]).output().unwrap();
    assert_eq!(stdout_json(&out)["count"], 0);

    // The rewritten file parses as current schema.
    let raw = std::fs::read_to_string(&data).unwrap();
    assert!(raw.contains("\"username\": \"User5\""));
}

#[test]
fn corrupt_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("tags.json");
    std::fs::write(&data, "definitely not json").unwrap();

    let out = tagping(&data).arg("list").output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    let err: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["error"]["code"], "CORRUPT_STATE");
}
