//! Integration tests for the `init` command.

mod common;

use common::{spawn_command, spawn_command_in};

#[test]
fn init_writes_valid_starter() {
    let dir = tempfile::tempdir().unwrap();
    let output = spawn_command_in(dir.path(), &["init"]);
    assert!(
        output.status.success(),
        "init should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config = dir.path().join("serpent-docs.yaml");
    assert!(config.exists(), "init should create serpent-docs.yaml");

    // The starter must pass its own validation
    let output = spawn_command(&["validate", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "starter config should validate cleanly: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn init_starter_has_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = spawn_command_in(dir.path(), &["init"]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(dir.path().join("serpent-docs.yaml")).unwrap();
    assert!(content.contains("Serpent Methylation Pipeline"));
    assert!(content.contains("sphinx_rtd_theme"));
    assert!(content.contains("sphinx.ext.autodoc"));
    assert!(content.contains("snakemake"));
}

#[test]
fn init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("serpent-docs.yaml");
    std::fs::write(&config, "project: keep me\n").unwrap();

    let output = spawn_command_in(dir.path(), &["init"]);
    assert!(
        !output.status.success(),
        "init should refuse to overwrite without --force"
    );

    let content = std::fs::read_to_string(&config).unwrap();
    assert_eq!(content, "project: keep me\n");
}

#[test]
fn init_force_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("serpent-docs.yaml");
    std::fs::write(&config, "project: old\n").unwrap();

    let output = spawn_command_in(dir.path(), &["init", "--force"]);
    assert!(
        output.status.success(),
        "init --force should overwrite: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = std::fs::read_to_string(&config).unwrap();
    assert!(content.contains("Serpent Methylation Pipeline"));
}

#[test]
fn init_into_explicit_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("docs");

    let output = spawn_command(&["init", target.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "init should create the target directory: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(target.join("serpent-docs.yaml").exists());
}
