//! Integration tests for the `show` command.

mod common;

use common::{fixture_path, spawn_command};
use serpent_docs::config::DocConfig;

#[test]
fn show_yaml_round_trips() {
    let config = fixture_path("valid.yaml");
    let output = spawn_command(&["show", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "show should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // The YAML output must itself be a loadable configuration
    let stdout = String::from_utf8_lossy(&output.stdout);
    let reloaded: DocConfig = serde_yaml::from_str(&stdout).expect("show output should reload");
    assert_eq!(reloaded.project, "Serpent Methylation Pipeline");
    assert_eq!(reloaded.release, "1.0.0");
}

#[test]
fn show_json_preserves_extension_order() {
    let config = fixture_path("valid.yaml");
    let output = spawn_command(&["show", "--format", "json", config.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "show --format json should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be valid JSON");

    assert_eq!(parsed["project"], "Serpent Methylation Pipeline");
    assert_eq!(parsed["release"], "1.0.0");
    assert_eq!(parsed["theme"], "sphinx_rtd_theme");

    let extensions: Vec<&str> = parsed["extensions"]
        .as_array()
        .expect("extensions should be an array")
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(extensions[0], "sphinx.ext.autodoc");
    assert_eq!(extensions[1], "sphinx.ext.viewcode");
    assert_eq!(*extensions.last().unwrap(), "myst_parser");
}

#[test]
fn show_minimal_round_trip_equality() {
    let config_path = fixture_path("minimal.yaml");
    let output = spawn_command(&["show", config_path.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let shown: DocConfig = serde_yaml::from_str(&stdout).unwrap();

    let original: DocConfig =
        serde_yaml::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(shown, original, "show must re-serialize field for field");
    assert_eq!(
        shown.extensions,
        vec!["sphinx.ext.autodoc", "sphinx.ext.viewcode"]
    );
}

#[test]
fn show_invalid_config_fails() {
    let config = fixture_path("duplicate_extensions.yaml");
    let output = spawn_command(&["show", config.to_str().unwrap()]);
    assert!(
        !output.status.success(),
        "show should refuse an invalid config"
    );
    assert_eq!(output.status.code(), Some(2));
}
