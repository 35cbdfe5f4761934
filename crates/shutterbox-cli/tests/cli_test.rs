//! Integration tests for the `shutterbox` CLI binary.
//!
//! Argument parsing, completions, profile management, and error exit
//! codes -- the only live "device" involved is a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shutterbox` binary with env isolation.
///
/// Points `SHUTTERBOX_CONFIG` into `dir` so tests never touch the
/// user's real configuration.
fn shutterbox_cmd(dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shutterbox");
    cmd.env("SHUTTERBOX_CONFIG", dir.join("config.toml"))
        .env_remove("SHUTTERBOX_DEVICE")
        .env_remove("SHUTTERBOX_HOST")
        .env_remove("SHUTTERBOX_PORT");
    cmd
}

/// Start a mock shutterBox answering `/api/device/state` and
/// `/api/shutter/state` on the given runtime.
fn start_mock_device(rt: &tokio::runtime::Runtime, id: &str) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/device/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "device": {
                    "deviceName": "Test ShutterBox",
                    "type": "shutterBox",
                    "id": id,
                }
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/shutter/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "shutter": {
                    "state": 2,
                    "currentPos": { "position": 92, "tilt": 100 },
                    "desiredPos": { "position": 92, "tilt": 100 },
                }
            })))
            .mount(&server)
            .await;

        server
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let tmp = tempfile::tempdir().unwrap();
    let output = shutterbox_cmd(tmp.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
}

#[test]
fn test_help_flag() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("shutterBox")
            .and(predicate::str::contains("open"))
            .and(predicate::str::contains("close"))
            .and(predicate::str::contains("tilt")),
    );
}

#[test]
fn test_completions() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shutterbox"));
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_position_out_of_range_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .args(["position", "150"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_tilt_requires_position_or_direction() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path()).arg("tilt").assert().failure().code(2);
}

#[test]
fn test_tilt_position_conflicts_with_open() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .args(["tilt", "50", "--open"])
        .assert()
        .failure()
        .code(2);
}

// ── Device resolution ───────────────────────────────────────────────

#[test]
fn test_status_without_configured_device() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .arg("status")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("No device configured"));
}

#[test]
fn test_devices_list_empty() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .args(["devices", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No devices configured"));
}

#[test]
fn test_devices_remove_missing_profile() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .args(["devices", "remove", "bedroom"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_devices_add_requires_host() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .args(["devices", "add", "bedroom"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn test_devices_add_unreachable_host() {
    let tmp = tempfile::tempdir().unwrap();
    shutterbox_cmd(tmp.path())
        .args([
            "devices", "add", "bedroom", "--host", "127.0.0.1", "--port", "1", "--timeout", "2",
        ])
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("cannot_connect"));
}

// ── Full profile round-trip against a mock device ───────────────────

#[test]
fn test_devices_add_list_and_duplicate_rejection() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = start_mock_device(&rt, "f12a29130ce");
    let tmp = tempfile::tempdir().unwrap();
    let addr = server.address();

    shutterbox_cmd(tmp.path())
        .args([
            "devices",
            "add",
            "bedroom",
            "--host",
            &addr.ip().to_string(),
            "--port",
            &addr.port().to_string(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Added 'bedroom'"));

    shutterbox_cmd(tmp.path())
        .args(["devices", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("bedroom")
                .and(predicate::str::contains("f12a29130ce"))
                .and(predicate::str::contains("(default)")),
        );

    // Same physical device under a second name: rejected by unique id.
    shutterbox_cmd(tmp.path())
        .args([
            "devices",
            "add",
            "bedroom2",
            "--host",
            &addr.ip().to_string(),
            "--port",
            &addr.port().to_string(),
        ])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("already configured"));

    // Same profile name again: also rejected.
    shutterbox_cmd(tmp.path())
        .args([
            "devices",
            "add",
            "bedroom",
            "--host",
            &addr.ip().to_string(),
            "--port",
            &addr.port().to_string(),
        ])
        .assert()
        .failure()
        .code(6);

    drop(server);
}

#[test]
fn test_status_against_mock_device() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = start_mock_device(&rt, "aabbcc");
    let tmp = tempfile::tempdir().unwrap();
    let addr = server.address();

    shutterbox_cmd(tmp.path())
        .args([
            "status",
            "--host",
            &addr.ip().to_string(),
            "--port",
            &addr.port().to_string(),
        ])
        .assert()
        .success()
        .stdout(
            // 92% closed in device space reads as 8% open.
            predicate::str::contains("8% open").and(predicate::str::contains("tilt: 100%")),
        );

    drop(server);
}
