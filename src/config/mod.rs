//! Configuration system for `serpent-docs`
//!
//! Loading, schema definition, and validation of documentation build
//! configurations. Configurations are YAML files that pass through a
//! staged pipeline: read, environment variable substitution, `$include`
//! resolution, typed deserialization, and validation. The resulting
//! [`DocConfig`] is frozen behind an `Arc` and never mutated afterwards.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use schema::{
    DocConfig, IntersphinxTarget, KNOWN_MYST_EXTENSIONS, OptionKind, RECOGNIZED_THEME_OPTIONS,
    ThemeOptionValue, theme_option_kind,
};
pub use validation::{ValidationResult, Validator};
