//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. File size check
//! 2. Read raw text (UTF-8 BOM stripped)
//! 3. Environment variable expansion (pre-parse, on raw text)
//! 4. YAML parsing
//! 5. `$include` directive resolution
//! 6. Deserialization to the typed record
//! 7. Validation
//! 8. Freeze with `Arc`

use crate::config::schema::DocConfig;
use crate::config::validation::Validator;
use crate::error::ConfigError;

use serde_yaml::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Root directory for resolving `$include` paths.
    pub include_root: PathBuf,

    /// Limits for configuration size.
    pub limits: ConfigLimits,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            include_root: PathBuf::from("docs"),
            limits: ConfigLimits::default(),
        }
    }
}

/// Limits for configuration size to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum number of extension identifiers.
    pub max_extensions: usize,

    /// Maximum number of intersphinx targets.
    pub max_intersphinx_targets: usize,

    /// Maximum number of exclude patterns.
    pub max_exclude_patterns: usize,

    /// Maximum include nesting depth.
    pub max_include_depth: usize,

    /// Maximum configuration file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_extensions: env_or("SERPENT_DOCS_MAX_EXTENSIONS", 100),
            max_intersphinx_targets: env_or("SERPENT_DOCS_MAX_INTERSPHINX_TARGETS", 200),
            max_exclude_patterns: env_or("SERPENT_DOCS_MAX_EXCLUDE_PATTERNS", 500),
            max_include_depth: env_or("SERPENT_DOCS_MAX_INCLUDE_DEPTH", 10),
            max_config_size: env_or("SERPENT_DOCS_MAX_CONFIG_SIZE", 1024 * 1024),
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<DocConfig>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full loading pipeline from YAML file to frozen
/// [`DocConfig`].
#[derive(Debug)]
pub struct ConfigLoader {
    options: LoaderOptions,
    include_cache: HashMap<PathBuf, Value>,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            include_cache: HashMap::new(),
        }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a configuration file and returns the frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - YAML parsing fails
    /// - Include resolution fails (circular includes, missing files)
    /// - Validation fails
    pub fn load(&mut self, path: &Path) -> Result<LoadResult, ConfigError> {
        let mut warnings = Vec::new();

        // File size limit
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size =
            usize::try_from(metadata.len()).unwrap_or(self.options.limits.max_config_size);
        if file_size > self.options.limits.max_config_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.limits.max_config_size),
            });
        }

        // Stage 0: Read raw file content
        let raw_content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        // Handle UTF-8 BOM
        let raw_content = raw_content.strip_prefix('\u{feff}').unwrap_or(&raw_content);

        // Stage 1: Environment variable substitution (before YAML parsing)
        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(raw_content, path)?;
        warnings.extend(env_sub.warnings);

        // Stage 2: YAML parsing
        let mut root: Value =
            serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        if root.is_null() {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "Configuration file is empty".to_string(),
            });
        }

        // Stage 3: $include resolution
        let mut include_resolver = IncludeResolver::new(
            self.options.include_root.clone(),
            self.options.limits.max_include_depth,
        );
        include_resolver.resolve(&mut root, &mut self.include_cache)?;

        // Stage 4: Deserialize to the typed record
        let config: DocConfig =
            serde_yaml::from_value(root).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: format!("Failed to deserialize configuration: {e}"),
            })?;

        // Stage 5: Validation
        let mut validator = Validator::new();
        let validation_result = validator.validate(&config, &self.options.limits);

        if validation_result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                errors: validation_result.errors,
            });
        }

        for issue in validation_result.warnings {
            warnings.push(LoadWarning {
                message: issue.message,
                location: Some(issue.path),
            });
        }

        // Stage 6: Freeze
        Ok(LoadResult {
            config: Arc::new(config),
            warnings,
        })
    }
}

// ============================================================================
// Environment Variable Substitution
// ============================================================================

/// Pre-parse environment variable substitution.
///
/// Runs on raw YAML text BEFORE parsing to preserve type inference.
struct EnvSubstitution {
    warnings: Vec<LoadWarning>,
}

impl EnvSubstitution {
    const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Substitutes environment variables in raw YAML text.
    ///
    /// Supports:
    /// - `${VAR}` - expand to value (empty string if unset with warning)
    /// - `${VAR:-default}` - expand to default if unset
    /// - `${VAR:?message}` - fail if unset
    /// - `$$` - literal `$`
    fn substitute(&mut self, raw_yaml: &str, source_path: &Path) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(raw_yaml.len());
        let mut chars = raw_yaml.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' {
                match chars.peek() {
                    Some('$') => {
                        // Escaped $$ -> literal $
                        chars.next();
                        result.push('$');
                    }
                    Some('{') => {
                        chars.next();
                        let (var_name, default, error_msg) = Self::parse_var_spec(&mut chars)?;

                        match std::env::var(&var_name) {
                            Ok(value) => result.push_str(&value),
                            Err(_) => {
                                if let Some(default_val) = default {
                                    result.push_str(&default_val);
                                } else if let Some(msg) = error_msg {
                                    return Err(ConfigError::EnvVarNotSet {
                                        var: var_name,
                                        location: msg,
                                    });
                                } else {
                                    // Missing var without default -> empty string with warning
                                    self.warnings.push(LoadWarning {
                                        message: format!(
                                            "Environment variable '{var_name}' is not set, using empty string"
                                        ),
                                        location: Some(source_path.display().to_string()),
                                    });
                                }
                            }
                        }
                    }
                    _ => result.push(c),
                }
            } else {
                result.push(c);
            }
        }

        Ok(result)
    }

    /// Parses a variable specification from `${...}`.
    ///
    /// Returns (`var_name`, `default_value`, `error_message`).
    fn parse_var_spec(
        chars: &mut std::iter::Peekable<std::str::Chars>,
    ) -> Result<(String, Option<String>, Option<String>), ConfigError> {
        let mut var_name = String::new();

        while let Some(&c) = chars.peek() {
            match c {
                '}' => {
                    chars.next();
                    return Ok((var_name, None, None));
                }
                ':' => {
                    chars.next();
                    match chars.peek() {
                        Some('-') => {
                            chars.next();
                            let default = Self::read_until_close(chars)?;
                            return Ok((var_name, Some(default), None));
                        }
                        Some('?') => {
                            chars.next();
                            let msg = Self::read_until_close(chars)?;
                            return Ok((var_name, None, Some(msg)));
                        }
                        _ => var_name.push(':'),
                    }
                }
                _ => {
                    chars.next();
                    var_name.push(c);
                }
            }
        }

        Err(ConfigError::ParseError {
            path: PathBuf::new(),
            line: None,
            message: format!("Unclosed environment variable reference: ${{{var_name}"),
        })
    }

    /// Reads content until closing `}`, handling nested braces.
    fn read_until_close(
        chars: &mut std::iter::Peekable<std::str::Chars>,
    ) -> Result<String, ConfigError> {
        let mut value = String::new();
        let mut depth = 1;

        for c in chars.by_ref() {
            match c {
                '{' => {
                    depth += 1;
                    value.push(c);
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(value);
                    }
                    value.push(c);
                }
                _ => value.push(c),
            }
        }

        Err(ConfigError::ParseError {
            path: PathBuf::new(),
            line: None,
            message: "Unclosed environment variable reference".to_string(),
        })
    }
}

// ============================================================================
// Include Resolution
// ============================================================================

/// Resolves `$include` directives in YAML values.
///
/// A mapping of the form `{$include: shared/theme.yaml, override: {...}}`
/// is replaced by the included file's content with the override
/// deep-merged on top. Paths resolve relative to the include root.
struct IncludeResolver {
    include_root: PathBuf,
    max_depth: usize,
    resolution_stack: Vec<PathBuf>,
}

impl IncludeResolver {
    const fn new(include_root: PathBuf, max_depth: usize) -> Self {
        Self {
            include_root,
            max_depth,
            resolution_stack: Vec::new(),
        }
    }

    /// Resolves all `$include` directives in the given value.
    fn resolve(
        &mut self,
        value: &mut Value,
        cache: &mut HashMap<PathBuf, Value>,
    ) -> Result<(), ConfigError> {
        match value {
            Value::Mapping(map) => {
                let include_key = Value::String("$include".to_string());
                if let Some(include_path_value) = map.get(&include_key).cloned() {
                    let path = self.resolve_path(&include_path_value)?;

                    // Cycle detection
                    if self.resolution_stack.contains(&path) {
                        let mut cycle = self.resolution_stack.clone();
                        cycle.push(path.clone());
                        return Err(ConfigError::CircularInclude { cycle });
                    }

                    // Depth check
                    if self.resolution_stack.len() >= self.max_depth {
                        return Err(ConfigError::InvalidValue {
                            field: "$include depth".to_string(),
                            value: format!("{}", self.resolution_stack.len() + 1),
                            expected: format!("at most {} levels", self.max_depth),
                        });
                    }

                    let included = Self::load_cached(&path, cache)?;

                    let override_key = Value::String("override".to_string());
                    let override_value = map.get(&override_key).cloned();

                    *value = included;

                    if let Some(overrides) = override_value {
                        deep_merge(value, &overrides);
                    }

                    // Recursively resolve includes in the loaded content
                    self.resolution_stack.push(path.clone());
                    self.resolve(value, cache)?;
                    self.resolution_stack.pop();
                } else {
                    let keys: Vec<Value> = map.keys().cloned().collect();
                    for key in keys {
                        if let Some(v) = map.get_mut(&key) {
                            self.resolve(v, cache)?;
                        }
                    }
                }
            }
            Value::Sequence(seq) => {
                for item in seq {
                    self.resolve(item, cache)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Resolves a path relative to the include root.
    fn resolve_path(&self, path_value: &Value) -> Result<PathBuf, ConfigError> {
        let path_str = path_value
            .as_str()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "$include".to_string(),
                value: format!("{path_value:?}"),
                expected: "string path".to_string(),
            })?;

        let path = Path::new(path_str);

        // Reject path traversal attempts (string-level check)
        if path_str.contains("..") {
            return Err(ConfigError::InvalidValue {
                field: "$include".to_string(),
                value: path_str.to_string(),
                expected: "path without '..' traversal".to_string(),
            });
        }

        if path.is_absolute() {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let resolved = self.include_root.join(path);

        if !resolved.exists() {
            return Err(ConfigError::MissingFile { path: resolved });
        }

        // Canonicalize and verify the path stays within the include root
        verify_within_base(&resolved, &self.include_root)?;

        Ok(resolved)
    }

    /// Loads a file with caching.
    fn load_cached(path: &Path, cache: &mut HashMap<PathBuf, Value>) -> Result<Value, ConfigError> {
        if let Some(cached) = cache.get(path) {
            return Ok(cached.clone());
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        // Handle UTF-8 BOM
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        // Environment substitution on included file
        let mut env_sub = EnvSubstitution::new();
        let substituted = env_sub.substitute(content, path)?;

        let value: Value =
            serde_yaml::from_str(&substituted).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        cache.insert(path.to_path_buf(), value.clone());
        Ok(value)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Verifies that a resolved path stays within the given base directory.
///
/// Canonicalizes both paths and checks that the resolved path is a
/// descendant of the base. This prevents symlink-based path traversal
/// that would bypass the string-level `..` check.
fn verify_within_base(resolved: &Path, base: &Path) -> Result<(), ConfigError> {
    let canonical = resolved
        .canonicalize()
        .map_err(|_| ConfigError::MissingFile {
            path: resolved.to_path_buf(),
        })?;
    let canonical_base = base.canonicalize().unwrap_or_else(|_| base.to_path_buf());

    if !canonical.starts_with(&canonical_base) {
        return Err(ConfigError::InvalidValue {
            field: "$include".to_string(),
            value: resolved.display().to_string(),
            expected: format!("path within {}", canonical_base.display()),
        });
    }

    Ok(())
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Deep merges override into base.
///
/// For mappings: recursively merge keys.
/// For other types: override replaces base.
fn deep_merge(base: &mut Value, override_val: &Value) {
    match (base, override_val) {
        (Value::Mapping(base_map), Value::Mapping(override_map)) => {
            for (key, override_value) in override_map {
                if let Some(base_value) = base_map.get_mut(key) {
                    deep_merge(base_value, override_value);
                } else {
                    base_map.insert(key.clone(), override_value.clone());
                }
            }
        }
        (base, override_val) => {
            *base = override_val.clone();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
