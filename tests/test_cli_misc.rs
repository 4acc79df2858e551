//! Integration tests for `version` and `completions`.

mod common;

use common::spawn_command;

#[test]
fn version_human_output() {
    let output = spawn_command(&["version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serpent-docs"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_json_output() {
    let output = spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout))
            .expect("version --format json should emit valid JSON");
    assert_eq!(parsed["name"], "serpent-docs");
}

#[test]
fn completions_bash_output() {
    let output = spawn_command(&["completions", "bash"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("serpent-docs"),
        "completion script should reference the binary name"
    );
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let output = spawn_command(&["frobnicate"]);
    assert!(!output.status.success());
}
