//! CLI contract tests.

use assert_cmd::Command;

fn courier_cmd() -> Command {
    let mut cmd = match Command::cargo_bin("courier") {
        Ok(cmd) => cmd,
        Err(err) => panic!("courier binary should build: {err}"),
    };
    cmd.env_clear();
    cmd
}

#[test]
fn help_lists_subcommands() {
    let assert = courier_cmd().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for subcommand in ["platforms", "send", "send-media", "mark-read", "conversations"] {
        assert!(stdout.contains(subcommand), "missing subcommand: {subcommand}");
    }
}

#[test]
fn platforms_reflects_config_file() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir should create: {err}"),
    };
    let config_path = dir.path().join("courier.toml");
    let written = std::fs::write(
        &config_path,
        r#"
[channels.whatsapp]
access_token = "token"
phone_number_id = "12345"

[channels.sms]
api_key = "key"
from_number = "+15550001111"
"#,
    );
    assert!(written.is_ok());

    let assert = courier_cmd()
        .env("COURIER_CONFIG_PATH", &config_path)
        .arg("platforms")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let listed: Vec<&str> = stdout.lines().collect();
    assert_eq!(listed, vec!["whatsapp", "sms"]);
}

#[test]
fn unknown_platform_fails_at_the_edge() {
    let assert = courier_cmd()
        .args(["send", "--platform", "discord", "--to", "x", "--message", "hi"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("unknown platform"));
}

#[test]
fn unregistered_platform_fails_without_network() {
    // No config at all: telegram is not registered, so dispatch fails with
    // the registration error before any request is attempted.
    let assert = courier_cmd()
        .args(["send", "--platform", "telegram", "--to", "42", "--message", "hi"])
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("no integration registered"));
}
