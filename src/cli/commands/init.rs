//! Starter configuration generation
//!
//! Implements `init`: writes a `serpent-docs.yaml` with the default
//! configuration so new checkouts start from a valid, fully populated
//! record.

use std::path::Path;

use crate::cli::args::InitArgs;
use crate::config::schema::DocConfig;
use crate::error::SerpentDocsError;

/// Name of the generated configuration file.
pub const CONFIG_FILE_NAME: &str = "serpent-docs.yaml";

const HEADER: &str = "\
# Documentation build configuration.
# Validate with `serpent-docs validate serpent-docs.yaml`.
";

/// Write a starter configuration file.
///
/// # Errors
///
/// Returns an I/O error if the target file already exists (and `--force`
/// was not given) or if the file cannot be written.
pub fn run(args: &InitArgs) -> Result<(), SerpentDocsError> {
    let target = args.directory.join(CONFIG_FILE_NAME);

    if target.exists() && !args.force {
        return Err(SerpentDocsError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!(
                "{} already exists (use --force to overwrite)",
                target.display()
            ),
        )));
    }

    if !args.directory.exists() {
        std::fs::create_dir_all(&args.directory)?;
    }

    std::fs::write(&target, starter_config()?)?;
    tracing::info!(file = %target.display(), "wrote starter configuration");
    println!("Wrote {}", target.display());

    Ok(())
}

/// Renders the default configuration as a YAML document.
fn starter_config() -> Result<String, SerpentDocsError> {
    let body = serde_yaml::to_string(&DocConfig::default())?;
    Ok(format!("{HEADER}\n{body}"))
}

/// Returns the starter configuration path inside `directory`.
#[must_use]
pub fn config_path(directory: &Path) -> std::path::PathBuf {
    directory.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_is_loadable() {
        let rendered = starter_config().unwrap();
        let parsed: DocConfig = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(parsed, DocConfig::default());
    }

    #[test]
    fn test_starter_config_has_header_comment() {
        let rendered = starter_config().unwrap();
        assert!(rendered.starts_with("# Documentation build configuration."));
    }

    #[test]
    fn test_init_refuses_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "project: existing\n").unwrap();

        let args = InitArgs {
            directory: dir.path().to_path_buf(),
            force: false,
        };
        let result = run(&args);
        assert!(result.is_err());

        // Existing content untouched
        let content = std::fs::read_to_string(config_path(dir.path())).unwrap();
        assert_eq!(content, "project: existing\n");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "project: existing\n").unwrap();

        let args = InitArgs {
            directory: dir.path().to_path_buf(),
            force: true,
        };
        run(&args).unwrap();

        let content = std::fs::read_to_string(config_path(dir.path())).unwrap();
        assert!(content.contains("Serpent Methylation Pipeline"));
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/config");

        let args = InitArgs {
            directory: nested.clone(),
            force: false,
        };
        run(&args).unwrap();

        assert!(config_path(&nested).exists());
    }
}
