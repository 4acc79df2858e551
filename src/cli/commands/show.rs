//! Resolved configuration display
//!
//! Implements `show`: loads a configuration through the full pipeline
//! (env substitution, includes, validation) and prints the frozen
//! record. The output re-serializes field for field, so a `show` of a
//! valid file is itself a loadable configuration.

use crate::cli::args::{ShowArgs, ShowFormat};
use crate::config::loader::{ConfigLoader, LoaderOptions};
use crate::error::SerpentDocsError;

/// Load a configuration and print the resolved, validated record.
///
/// # Errors
///
/// Returns a config error if loading or validation fails, or a
/// serialization error if the record cannot be rendered.
pub fn run(args: &ShowArgs) -> Result<(), SerpentDocsError> {
    let options = args.include_root.as_ref().map_or_else(
        LoaderOptions::default,
        |root| LoaderOptions {
            include_root: root.clone(),
            ..LoaderOptions::default()
        },
    );

    let mut loader = ConfigLoader::new(options);
    let result = loader.load(&args.file)?;

    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    match args.format {
        ShowFormat::Yaml => print!("{}", serde_yaml::to_string(&*result.config)?),
        ShowFormat::Json => println!("{}", serde_json::to_string_pretty(&*result.config)?),
    }

    Ok(())
}
