//! Integration tests for the passman CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Prompts need a terminal, so the vault password is supplied through
//! `PASSMAN_PASSWORD` and only non-interactive commands are driven.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const PLAIN_VAULT: &str = r#"{
  "entries": {
    "github": { "login": "alice", "host": "github.com", "password": "gh-secret" },
    "aws": { "comment": "root account", "password": "aws-secret" },
    "mail": { "password": "mail-secret" }
  },
  "encrypted": false
}"#;

/// Helper: get a Command pointing at the passman binary with a clean env.
fn passman() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passman").expect("binary should exist");
    cmd.env_remove("PASSMAN_PASSWORD")
        .env_remove("PASSMAN_VAULT")
        .env_remove("PASSMAN_LOG");
    cmd
}

/// Helper: a temp dir with a plaintext vault file.
fn plain_vault() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.child("vault.json");
    vault.write_str(PLAIN_VAULT).unwrap();
    let path = vault.path().to_path_buf();
    (tmp, path)
}

fn encrypt(path: &std::path::Path, password: &str) {
    passman()
        .arg("--vault")
        .arg(path)
        .arg("encrypt")
        .env("PASSMAN_PASSWORD", password)
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Basic surface
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    passman()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("password manager"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn version_flag_shows_version() {
    passman()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passman"));
}

#[test]
fn no_args_shows_help() {
    passman()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_bash() {
    passman()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passman"));
}

#[test]
fn completions_unknown_shell_fails() {
    passman()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'tcsh'"));
}

// ---------------------------------------------------------------------------
// path / status / list
// ---------------------------------------------------------------------------

#[test]
fn path_prints_vault_flag() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("my-vault.json");
    passman()
        .arg("--vault")
        .arg(&path)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("my-vault.json"));
}

#[test]
fn path_honors_env_var() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("from-env.json");
    passman()
        .env("PASSMAN_VAULT", &path)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env.json"));
}

#[test]
fn list_on_missing_vault_is_empty() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("vault.json");
    passman()
        .arg("--vault")
        .arg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No services"));
    assert!(!path.exists(), "listing must not create the vault");
}

#[test]
fn list_shows_numbered_services_without_passwords() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. aws"))
        .stdout(predicate::str::contains("2. github"))
        .stdout(predicate::str::contains("alice @ github.com"))
        .stdout(predicate::str::contains("3. mail"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn list_table() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .args(["list", "--table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service"))
        .stdout(predicate::str::contains("root account"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn list_filter_keeps_full_list_numbers() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .args(["list", "-f", "GIT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. github"))
        .stdout(predicate::str::contains("aws").not())
        .stdout(predicate::str::contains("showing 1 of 3"));
}

#[test]
fn list_filter_without_match() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .args(["list", "--filter", "nothing-like-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries match"));
}

#[test]
fn status_reports_plaintext_vault() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries:   3"))
        .stdout(predicate::str::contains("Encrypted: false"));
}

// ---------------------------------------------------------------------------
// encrypt / decrypt
// ---------------------------------------------------------------------------

#[test]
fn encrypt_then_status_and_decrypt() {
    let (_tmp, path) = plain_vault();
    encrypt(&path, "master-pw");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("github"), "vault must not leak service names");

    passman()
        .arg("--vault")
        .arg(&path)
        .arg("status")
        .env("PASSMAN_PASSWORD", "master-pw")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted: true"))
        .stdout(predicate::str::contains("Entries:   3"));

    passman()
        .arg("--vault")
        .arg(&path)
        .arg("decrypt")
        .env("PASSMAN_PASSWORD", "master-pw")
        .assert()
        .success()
        .stdout(predicate::str::contains("decrypted successfully"));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"github\""));
    assert!(raw.contains("\"encrypted\": false"));
}

#[test]
fn wrong_password_fails() {
    let (_tmp, path) = plain_vault();
    encrypt(&path, "master-pw");

    passman()
        .arg("--vault")
        .arg(&path)
        .arg("list")
        .env("PASSMAN_PASSWORD", "not-it")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn encrypted_vault_without_terminal_or_password_fails() {
    let (_tmp, path) = plain_vault();
    encrypt(&path, "master-pw");

    passman()
        .arg("--vault")
        .arg(&path)
        .arg("list")
        .assert()
        .failure();
}

#[test]
fn encrypt_twice_is_a_no_op() {
    let (_tmp, path) = plain_vault();
    encrypt(&path, "master-pw");
    let before = std::fs::read(&path).unwrap();

    passman()
        .arg("--vault")
        .arg(&path)
        .arg("encrypt")
        .env("PASSMAN_PASSWORD", "master-pw")
        .assert()
        .success()
        .stdout(predicate::str::contains("already encrypted"));

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn decrypt_plaintext_is_a_no_op() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .arg("decrypt")
        .assert()
        .success()
        .stdout(predicate::str::contains("not encrypted"));
}

#[test]
fn corrupted_vault_is_reported() {
    let tmp = TempDir::new().unwrap();
    let vault = tmp.child("vault.json");
    vault.write_str("definitely not a vault!").unwrap();

    passman()
        .arg("--vault")
        .arg(vault.path())
        .arg("list")
        .env("PASSMAN_PASSWORD", "pw")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupted"));
}

// ---------------------------------------------------------------------------
// copy
// ---------------------------------------------------------------------------

#[test]
fn copy_unknown_service_fails() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .args(["copy", "gitlab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'gitlab' not found"));
}

#[test]
fn copy_number_out_of_range_fails() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .args(["copy", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// ---------------------------------------------------------------------------
// open
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn open_with_noop_editor_keeps_vault() {
    let (_tmp, path) = plain_vault();
    passman()
        .arg("--vault")
        .arg(&path)
        .args(["open", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault updated (3 entries)"));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("gh-secret"));
}

#[cfg(unix)]
#[test]
fn open_with_failing_editor_reports_error() {
    let (_tmp, path) = plain_vault();
    let before = std::fs::read(&path).unwrap();

    passman()
        .arg("--vault")
        .arg(&path)
        .args(["open", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Editor error"));

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[cfg(unix)]
#[test]
fn open_encrypted_vault_stays_encrypted() {
    let (_tmp, path) = plain_vault();
    encrypt(&path, "master-pw");

    passman()
        .arg("--vault")
        .arg(&path)
        .args(["open", "true"])
        .env("PASSMAN_PASSWORD", "master-pw")
        .assert()
        .success();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("github"));

    passman()
        .arg("--vault")
        .arg(&path)
        .arg("status")
        .env("PASSMAN_PASSWORD", "master-pw")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted: true"));
}
