//! Integration tests for the command-line binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BIN: &str = "github-commit-status-mark";

fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// A repository with one commit; returns it and the HEAD hash.
fn setup_repo() -> (TempDir, String) {
    let temp = TempDir::new().unwrap();
    git(temp.path(), &["init", "-q"]);
    git(temp.path(), &["config", "user.name", "Test"]);
    git(temp.path(), &["config", "user.email", "test@example.com"]);
    git(temp.path(), &["config", "commit.gpgsign", "false"]);
    fs::write(temp.path().join("README"), "hello\n").unwrap();
    git(temp.path(), &["add", "README"]);
    git(temp.path(), &["commit", "-q", "-m", "initial"]);
    let head = git(temp.path(), &["rev-parse", "HEAD"]);
    (temp, head)
}

fn write_cache(repo: &Path, hash: &str, status: &str, last_modified: i64) {
    let dir = repo.join(".github-commit-status");
    fs::create_dir_all(&dir).unwrap();
    let body = serde_json::json!({
        "Revisions": {
            hash: { "Status": status, "LastModified": last_modified }
        }
    });
    fs::write(dir.join("cache"), body.to_string()).unwrap();
}

fn read_cache(repo: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(repo.join(".github-commit-status").join("cache")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

/// The binary run inside `repo`, isolated from the caller's credentials.
fn mark_cmd(repo: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin(BIN));
    cmd.current_dir(repo)
        .env("HOME", repo)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("NETRC", repo.join("no-netrc"))
        .env_remove("GITHUB_COMMIT_STATUS_MARK_TOKEN")
        .env_remove("GITHUB_COMMIT_STATUS_MARK_API_URL")
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin(BIN));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--cached"))
        .stdout(predicate::str::contains("--update"))
        .stdout(predicate::str::contains("--api-url").not());
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin(BIN));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn fresh_cache_entry_is_printed_without_network() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, head) = setup_repo();
    write_cache(repo.path(), &head, "success", now());

    let server = MockServer::start();
    let api = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(serde_json::json!([]));
    });

    mark_cmd(repo.path())
        .args(["--no-color", "--api-url", &server.base_url()])
        .assert()
        .success()
        .stdout("✓");

    api.assert_calls(0);
    Ok(())
}

#[test]
fn colored_mark_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, head) = setup_repo();
    write_cache(repo.path(), &head, "failure", 0);

    mark_cmd(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✗"))
        .stdout(predicate::str::starts_with("\u{1b}["));
    Ok(())
}

#[test]
fn no_color_env_prints_bare_glyph() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, head) = setup_repo();
    write_cache(repo.path(), &head, "failure", 0);

    mark_cmd(repo.path())
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout("✗");
    Ok(())
}

#[test]
fn cached_flag_uses_stale_entry() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, head) = setup_repo();
    write_cache(repo.path(), &head, "pending", now() - 3600);

    mark_cmd(repo.path())
        .args(["--no-color", "--cached"])
        .assert()
        .success()
        .stdout("●");
    Ok(())
}

#[test]
fn corrupt_cache_degrades_silently() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, _head) = setup_repo();
    let dir = repo.path().join(".github-commit-status");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("cache"), [0xff, 0xfe, 0x7b, 0x00, 0xc3])?;

    mark_cmd(repo.path())
        .args(["--no-color", "--cached"])
        .assert()
        .success()
        .stdout("?")
        .stderr("");
    Ok(())
}

#[test]
fn stale_entry_is_refreshed_from_api() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, head) = setup_repo();
    git(
        repo.path(),
        &["remote", "add", "origin", "https://github.com/octocat/hello.git"],
    );
    write_cache(repo.path(), &head, "pending", now() - 3600);

    let server = MockServer::start();
    let api = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/repos/octocat/hello/commits/{}/statuses", head));
        then.status(200)
            .json_body(serde_json::json!([{ "state": "success" }, { "state": "pending" }]));
    });

    mark_cmd(repo.path())
        .args(["--no-color", "--api-url", &server.base_url()])
        .assert()
        .success()
        .stdout("✓");

    api.assert();
    let cache = read_cache(repo.path());
    assert_eq!(cache["Revisions"][head.as_str()]["Status"], "success");
    Ok(())
}

#[test]
fn token_from_env_is_sent() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, head) = setup_repo();
    git(
        repo.path(),
        &["remote", "add", "origin", "git@github.com:octocat/hello.git"],
    );

    let server = MockServer::start();
    let api = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/repos/octocat/hello/commits/{}/statuses", head))
            .header("Authorization", "Bearer s3cret");
        then.status(200).json_body(serde_json::json!([]));
    });

    mark_cmd(repo.path())
        .env("GITHUB_COMMIT_STATUS_MARK_TOKEN", "s3cret")
        .args(["--no-color", "--api-url", &server.base_url()])
        .assert()
        .success()
        .stdout("?");

    api.assert();
    let cache = read_cache(repo.path());
    assert_eq!(cache["Revisions"][head.as_str()]["Status"], "");
    Ok(())
}

#[test]
fn api_failure_exits_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, _head) = setup_repo();
    git(
        repo.path(),
        &["remote", "add", "origin", "https://github.com/octocat/hello"],
    );

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(500)
            .json_body(serde_json::json!({ "message": "Server Error" }));
    });

    mark_cmd(repo.path())
        .args(["--no-color", "--api-url", &server.base_url()])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Error:"));

    assert!(!repo.path().join(".github-commit-status").exists());
    Ok(())
}

#[test]
fn missing_remote_exits_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, _head) = setup_repo();

    mark_cmd(repo.path())
        .arg("--no-color")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("remote.origin.url"));
    Ok(())
}

#[test]
fn unknown_revision_exits_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let (repo, _head) = setup_repo();

    mark_cmd(repo.path())
        .args(["--no-color", "no-such-branch"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("rev-parse"));
    Ok(())
}

#[test]
fn outside_repository_exits_with_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    mark_cmd(temp.path())
        .env("GIT_CEILING_DIRECTORIES", temp.path().parent().unwrap_or(temp.path()))
        .arg("--no-color")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn prints_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin(BIN));
    cmd.args(["--completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(BIN));
    Ok(())
}
