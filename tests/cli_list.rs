//! List output: text table and JSON.

use std::fs;

mod common;

use predicates::prelude::*;

#[test]
fn list_shows_entries_tab_separated() {
    let dir = common::temp_home();
    let ssh_path = dir.path().join("ssh_config");
    let alias_path = dir.path().join("aliases");
    fs::write(
        &ssh_path,
        "Host db1\n  Hostname db1.example.com\n  Port 22\n  User admin\n\n",
    )
    .unwrap();
    fs::write(&alias_path, "alias db1=\"ssh db1\"\n").unwrap();

    common::hostman_cmd()
        .env("HOSTMAN_HOME", dir.path())
        .env("HOSTMAN_SSH_CONFIG", &ssh_path)
        .env("HOSTMAN_ALIAS_FILE", &alias_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("db1\tdb1.example.com\t22\tadmin"));
}

#[test]
fn list_marks_legacy_kex_entries() {
    let dir = common::temp_home();
    let ssh_path = dir.path().join("ssh_config");
    let alias_path = dir.path().join("aliases");
    fs::write(
        &ssh_path,
        "Host old1\n  Hostname old1.example.com\n  Port 22\n  User admin\n  KexAlgorithms +diffie-hellman-group1-sha1\n\n",
    )
    .unwrap();
    fs::write(&alias_path, "").unwrap();

    common::hostman_cmd()
        .env("HOSTMAN_HOME", dir.path())
        .env("HOSTMAN_SSH_CONFIG", &ssh_path)
        .env("HOSTMAN_ALIAS_FILE", &alias_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("(legacy-kex)"));
}

#[test]
fn list_aliases_shows_commands() {
    let dir = common::temp_home();
    let ssh_path = dir.path().join("ssh_config");
    let alias_path = dir.path().join("aliases");
    fs::write(&ssh_path, "").unwrap();
    fs::write(
        &alias_path,
        "alias tn1=\"telnet tn1.example.com\"\n",
    )
    .unwrap();

    common::hostman_cmd()
        .env("HOSTMAN_HOME", dir.path())
        .env("HOSTMAN_SSH_CONFIG", &ssh_path)
        .env("HOSTMAN_ALIAS_FILE", &alias_path)
        .args(["list", "--aliases"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tn1\ttelnet tn1.example.com"));
}

#[test]
fn list_json_is_parseable() {
    let dir = common::temp_home();
    let ssh_path = dir.path().join("ssh_config");
    let alias_path = dir.path().join("aliases");
    fs::write(
        &ssh_path,
        "Host old1\n  Hostname old1.example.com\n  Port 22\n  User admin\n  KexAlgorithms +diffie-hellman-group1-sha1\n\n",
    )
    .unwrap();
    fs::write(&alias_path, "").unwrap();

    let out = common::hostman_cmd()
        .env("HOSTMAN_HOME", dir.path())
        .env("HOSTMAN_SSH_CONFIG", &ssh_path)
        .env("HOSTMAN_ALIAS_FILE", &alias_path)
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "old1");
    assert_eq!(parsed[0]["hostname"], "old1.example.com");
    assert_eq!(parsed[0]["legacy_kex"], true);
}

#[test]
fn list_of_missing_files_is_empty_and_succeeds() {
    let dir = common::temp_home();

    common::hostman_cmd()
        .env("HOSTMAN_HOME", dir.path())
        .env("HOSTMAN_SSH_CONFIG", dir.path().join("ssh_config"))
        .env("HOSTMAN_ALIAS_FILE", dir.path().join("aliases"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
