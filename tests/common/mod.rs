//! Shared integration-test harness for running the `serpent-docs` binary
//! as a child process.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Runs the `serpent-docs` binary with the given arguments and waits
/// for it to exit.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn spawn_command(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_serpent-docs");
    Command::new(bin)
        .args(args)
        .env_remove("SERPENT_DOCS_LOG_LEVEL")
        .env_remove("SERPENT_DOCS_INCLUDE_ROOT")
        .output()
        .expect("failed to spawn serpent-docs")
}

/// Like [`spawn_command`] but with the working directory set.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn spawn_command_in(dir: &std::path::Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_serpent-docs");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("SERPENT_DOCS_LOG_LEVEL")
        .env_remove("SERPENT_DOCS_INCLUDE_ROOT")
        .output()
        .expect("failed to spawn serpent-docs")
}

/// Returns the path to a test fixture.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}
