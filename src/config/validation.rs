//! Configuration validation
//!
//! Schema and semantic validation for documentation configurations.
//! Validation runs after all `$include` directives have been resolved,
//! on the fully deserialized [`DocConfig`].
//!
//! Validation collects ALL errors (doesn't stop at first) to provide
//! comprehensive feedback to users.

use crate::config::loader::ConfigLimits;
use crate::config::schema::{
    DocConfig, IntersphinxTarget, KNOWN_MYST_EXTENSIONS, RECOGNIZED_THEME_OPTIONS,
    ThemeOptionValue, theme_option_kind,
};
use crate::error::{Severity, ValidationIssue};

use std::collections::HashSet;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.85;

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration validator.
///
/// Performs schema validation and semantic validation on a [`DocConfig`].
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a configuration and returns the result.
    ///
    /// This method collects all errors and warnings rather than stopping
    /// at the first issue.
    pub fn validate(&mut self, config: &DocConfig, limits: &ConfigLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        self.validate_identity(config);
        self.validate_extensions(config);
        self.validate_theme_options(config);
        self.validate_intersphinx(config);
        self.validate_myst_extensions(config);
        self.validate_paths(config);
        self.validate_limits(config, limits);

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Project Identity
    // ========================================================================

    /// Validates the required identity fields.
    fn validate_identity(&mut self, config: &DocConfig) {
        if config.project.is_empty() {
            self.add_error("project", "Project name is required and cannot be empty");
        }

        if config.project.len() > 100 {
            self.add_warning("project", "Project name is unusually long (> 100 characters)");
        }

        if config.author.is_empty() {
            self.add_error("author", "Author is required and cannot be empty");
        }

        if config.release.is_empty() {
            self.add_error("release", "Release version is required and cannot be empty");
        } else if !config.release.starts_with(|c: char| c.is_ascii_digit()) {
            self.add_warning(
                "release",
                &format!(
                    "Release '{}' does not start with a digit; version strings usually do",
                    config.release
                ),
            );
        }

        if config.theme.is_empty() {
            self.add_error("theme", "Theme is required and cannot be empty");
        }

        if let Some(copyright) = &config.copyright {
            if copyright.is_empty() {
                self.add_warning("copyright", "Copyright is present but empty");
            }
        }
    }

    // ========================================================================
    // Extensions
    // ========================================================================

    /// Validates the extension list and its load-order invariants.
    fn validate_extensions(&mut self, config: &DocConfig) {
        if config.extensions.is_empty() {
            self.add_error("extensions", "At least one extension is required");
        }

        let mut seen = HashSet::new();
        for (idx, extension) in config.extensions.iter().enumerate() {
            let path = format!("extensions[{idx}]");

            if extension.is_empty() {
                self.add_error(&path, "Extension identifier cannot be empty");
                continue;
            }

            if !seen.insert(extension) {
                self.add_error(&path, &format!("Duplicate extension: '{extension}'"));
            }
        }

        // MyST extensions only take effect when the parser itself is loaded
        if !config.myst_extensions.is_empty()
            && !config.extensions.iter().any(|e| e == "myst_parser")
        {
            self.add_warning(
                "myst_extensions",
                "MyST extensions configured, but 'myst_parser' is not in the extension list",
            );
        }
    }

    // ========================================================================
    // Theme Options
    // ========================================================================

    /// Validates theme option keys against the recognized set and each
    /// value against the kind its key expects.
    fn validate_theme_options(&mut self, config: &DocConfig) {
        for (key, value) in &config.theme_options {
            let path = format!("theme_options.{key}");

            match theme_option_kind(key) {
                None => {
                    let message = suggest(key, RECOGNIZED_THEME_OPTIONS.iter().map(|(k, _)| *k))
                        .map_or_else(
                            || format!("Unrecognized theme option '{key}'"),
                            |candidate| {
                                format!(
                                    "Unrecognized theme option '{key}'. Did you mean '{candidate}'?"
                                )
                            },
                        );
                    self.add_error(&path, &message);
                }
                Some(kind) if !kind.matches(value) => {
                    self.add_error(
                        &path,
                        &format!(
                            "Expected {} value for '{key}', got {}",
                            kind.name(),
                            value.kind_name()
                        ),
                    );
                }
                Some(_) => {}
            }
        }

        // navigation_depth of 0 hides the whole sidebar tree
        if let Some(ThemeOptionValue::Integer(0)) = config.theme_options.get("navigation_depth") {
            self.add_warning(
                "theme_options.navigation_depth",
                "navigation_depth of 0 disables sidebar navigation entirely",
            );
        }
    }

    // ========================================================================
    // Intersphinx Mapping
    // ========================================================================

    /// Validates cross-project link targets.
    fn validate_intersphinx(&mut self, config: &DocConfig) {
        for (name, target) in &config.intersphinx_mapping {
            let path = format!("intersphinx_mapping.{name}");

            if name.is_empty() {
                self.add_error("intersphinx_mapping", "External project name cannot be empty");
            }

            self.validate_intersphinx_target(target, &path);
        }
    }

    /// Validates a single intersphinx target.
    fn validate_intersphinx_target(&mut self, target: &IntersphinxTarget, path: &str) {
        let url = target.url();

        if url.is_empty() {
            self.add_error(path, "Base URL cannot be empty");
            return;
        }

        if !url.starts_with("https://") && !url.starts_with("http://") {
            self.add_error(
                path,
                &format!("Base URL '{url}' must start with http:// or https://"),
            );
        } else if !url.ends_with('/') {
            self.add_warning(
                path,
                &format!("Base URL '{url}' has no trailing slash; relative links may break"),
            );
        }

        if let Some(inventory) = target.inventory() {
            if inventory.is_empty() {
                self.add_warning(
                    path,
                    "Inventory override is an empty string; omit it to use the default location",
                );
            }
        }
    }

    // ========================================================================
    // MyST Extensions
    // ========================================================================

    /// Validates MyST markdown-dialect extension names.
    fn validate_myst_extensions(&mut self, config: &DocConfig) {
        let mut seen = HashSet::new();

        for (idx, name) in config.myst_extensions.iter().enumerate() {
            let path = format!("myst_extensions[{idx}]");

            if !KNOWN_MYST_EXTENSIONS.contains(&name.as_str()) {
                let message = suggest(name, KNOWN_MYST_EXTENSIONS.iter().copied()).map_or_else(
                    || format!("Unknown MyST extension '{name}'"),
                    |candidate| {
                        format!("Unknown MyST extension '{name}'. Did you mean '{candidate}'?")
                    },
                );
                self.add_error(&path, &message);
            }

            if !seen.insert(name) {
                self.add_warning(&path, &format!("Duplicate MyST extension: '{name}'"));
            }
        }
    }

    // ========================================================================
    // Paths
    // ========================================================================

    /// Validates path patterns and the logo asset path.
    fn validate_paths(&mut self, config: &DocConfig) {
        self.validate_pattern_list(&config.templates_path, "templates_path");
        self.validate_pattern_list(&config.exclude_patterns, "exclude_patterns");
        self.validate_pattern_list(&config.static_path, "static_path");

        if let Some(logo) = &config.logo_path {
            let recognized_image = logo
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| {
                    matches!(
                        ext.to_ascii_lowercase().as_str(),
                        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "ico"
                    )
                });

            if !recognized_image {
                self.add_warning(
                    "logo_path",
                    &format!(
                        "Logo path '{}' does not look like an image file",
                        logo.display()
                    ),
                );
            }
        }
    }

    /// Validates a list of path patterns.
    fn validate_pattern_list(&mut self, patterns: &[String], base_path: &str) {
        let mut seen = HashSet::new();

        for (idx, pattern) in patterns.iter().enumerate() {
            let path = format!("{base_path}[{idx}]");

            if pattern.is_empty() {
                self.add_error(&path, "Path pattern cannot be empty");
                continue;
            }

            if !seen.insert(pattern) {
                self.add_warning(&path, &format!("Duplicate path pattern: '{pattern}'"));
            }
        }
    }

    // ========================================================================
    // Limits Validation
    // ========================================================================

    /// Validates configuration against size limits.
    fn validate_limits(&mut self, config: &DocConfig, limits: &ConfigLimits) {
        if config.extensions.len() > limits.max_extensions {
            self.add_error(
                "extensions",
                &format!(
                    "Too many extensions: {} (maximum: {}). \
                     Set SERPENT_DOCS_MAX_EXTENSIONS to increase the limit.",
                    config.extensions.len(),
                    limits.max_extensions
                ),
            );
        }

        if config.intersphinx_mapping.len() > limits.max_intersphinx_targets {
            self.add_error(
                "intersphinx_mapping",
                &format!(
                    "Too many intersphinx targets: {} (maximum: {}). \
                     Set SERPENT_DOCS_MAX_INTERSPHINX_TARGETS to increase the limit.",
                    config.intersphinx_mapping.len(),
                    limits.max_intersphinx_targets
                ),
            );
        }

        if config.exclude_patterns.len() > limits.max_exclude_patterns {
            self.add_error(
                "exclude_patterns",
                &format!(
                    "Too many exclude patterns: {} (maximum: {}). \
                     Set SERPENT_DOCS_MAX_EXCLUDE_PATTERNS to increase the limit.",
                    config.exclude_patterns.len(),
                    limits.max_exclude_patterns
                ),
            );
        }
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Finds the closest known name to `input`, if any is similar enough.
fn suggest(input: &str, candidates: impl Iterator<Item = &'static str>) -> Option<&'static str> {
    candidates
        .map(|candidate| (candidate, strsim::jaro_winkler(input, candidate)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(candidate, _)| candidate)
}

// ============================================================================
// Tests
// ============================================================================
