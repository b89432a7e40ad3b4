//! Integration tests for the `apicctl` binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and parameter-validation behavior — all without a live APIC. Network
//! errors never appear here: validation failures must exit before any
//! connection attempt.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `apicctl` binary with env isolation.
///
/// Clears all `APIC_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn apicctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("apicctl");
    cmd.env("HOME", "/tmp/apicctl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/apicctl-test-nonexistent")
        .env_remove("APIC_PROFILE")
        .env_remove("APIC_HOST")
        .env_remove("APIC_USERNAME")
        .env_remove("APIC_PASSWORD")
        .env_remove("APIC_OUTPUT")
        .env_remove("APIC_INSECURE")
        .env_remove("APIC_TIMEOUT")
        .env_remove("APIC_CA_CERT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = apicctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    apicctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ACI fabric")
            .and(predicate::str::contains("match-as-path-term"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    apicctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("apicctl"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    apicctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    apicctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Parameter validation (no network call) ──────────────────────────

#[test]
fn test_present_requires_tenant() {
    let output = apicctl_cmd()
        .args(["match-as-path-term", "present", "t1", "--match-rule", "rules"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage error");
    let text = combined_output(&output);
    assert!(
        text.contains("--tenant"),
        "Expected missing --tenant mention:\n{text}"
    );
}

#[test]
fn test_present_requires_name() {
    let output = apicctl_cmd()
        .args([
            "match-as-path-term",
            "present",
            "--tenant",
            "prod",
            "--match-rule",
            "rules",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage error");
    let text = combined_output(&output);
    assert!(
        text.contains("NAME") || text.contains("name"),
        "Expected missing name mention:\n{text}"
    );
}

#[test]
fn test_absent_requires_tenant() {
    let output = apicctl_cmd()
        .args(["match-as-path-term", "absent", "t1", "--match-rule", "rules"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage error");
}

// ── Unconfigured invocations ────────────────────────────────────────

#[test]
fn test_query_without_controller_fails_cleanly() {
    // Query accepts an empty key set, so it passes validation and then
    // fails on missing connection configuration — exit 1, not a panic.
    let output = apicctl_cmd()
        .args(["match-as-path-term", "query"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No controller configured"),
        "Expected configuration error:\n{text}"
    );
}

#[test]
fn test_invalid_subcommand() {
    let output = apicctl_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_prints_location() {
    apicctl_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_rejects_bad_url() {
    let output = apicctl_cmd()
        .args([
            "config",
            "init",
            "--host",
            "not a url",
            "--username",
            "admin",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage error");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid controller URL"),
        "Expected URL validation error:\n{text}"
    );
}
