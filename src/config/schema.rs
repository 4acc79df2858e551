//! Configuration schema types
//!
//! This module defines the documentation-build configuration record for
//! the Serpent Methylation Pipeline docs site. The record is
//! deserialized from YAML configuration files, validated, and then
//! handed read-only to the documentation generator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration record for a documentation build.
///
/// Every field is plain data: the record performs no I/O and holds no
/// derived state. Once loaded it is frozen behind an `Arc` and never
/// mutated for the lifetime of the build.
///
/// Mapping fields use [`IndexMap`] and sequence fields use `Vec` so that
/// declaration order survives a serialize/reload round trip —
/// `extensions` order in particular controls extension load order in the
/// generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocConfig {
    /// Name of the documented project (required).
    pub project: String,

    /// Copyright line rendered in the page footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// Author string (required).
    pub author: String,

    /// Release version string (required).
    pub release: String,

    /// Extension modules to load, in load order.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Template directories, relative to the config file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates_path: Vec<String>,

    /// Glob patterns excluded when scanning for source files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_patterns: Vec<String>,

    /// Static asset directories, relative to the config file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_path: Vec<String>,

    /// Identifier of the rendering theme (required).
    pub theme: String,

    /// Theme options, keyed by option name.
    ///
    /// Only keys listed in [`RECOGNIZED_THEME_OPTIONS`] are accepted;
    /// value kinds are checked per key during validation.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub theme_options: IndexMap<String, ThemeOptionValue>,

    /// Path to the logo asset, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,

    /// Cross-project link targets, keyed by external project name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub intersphinx_mapping: IndexMap<String, IntersphinxTarget>,

    /// Markdown-dialect extensions enabled for MyST sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub myst_extensions: Vec<String>,
}

// ============================================================================
// Theme Options
// ============================================================================

/// A single theme option value.
///
/// Theme options are heterogeneous (booleans, integers, strings), so the
/// schema keeps them loosely typed and the validator checks each value
/// against the kind expected for its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeOptionValue {
    /// Boolean flag (e.g. `logo_only`, `sticky_navigation`).
    Bool(bool),
    /// Integer value (e.g. `navigation_depth`).
    Integer(u64),
    /// Text value (e.g. `canonical_url`, `style_nav_header_background`).
    Text(String),
}

impl ThemeOptionValue {
    /// Human-readable name of the value's kind, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Text(_) => "string",
        }
    }
}

/// Expected value kind for a recognized theme option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Boolean flag.
    Bool,
    /// Non-negative integer.
    Integer,
    /// Free-form string.
    Text,
}

impl OptionKind {
    /// Returns `true` if `value` matches this kind.
    #[must_use]
    pub const fn matches(self, value: &ThemeOptionValue) -> bool {
        matches!(
            (self, value),
            (Self::Bool, ThemeOptionValue::Bool(_))
                | (Self::Integer, ThemeOptionValue::Integer(_))
                | (Self::Text, ThemeOptionValue::Text(_))
        )
    }

    /// Human-readable name of this kind, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Text => "string",
        }
    }
}

/// The complete set of theme option keys the rendering theme recognizes,
/// with the value kind each expects.
///
/// An option outside this set is silently ignored by the theme, which in
/// practice always means a typo, so the validator treats it as an error.
pub const RECOGNIZED_THEME_OPTIONS: [(&str, OptionKind); 13] = [
    ("canonical_url", OptionKind::Text),
    ("analytics_id", OptionKind::Text),
    ("logo_only", OptionKind::Bool),
    ("display_version", OptionKind::Bool),
    ("prev_next_buttons_location", OptionKind::Text),
    ("style_external_links", OptionKind::Bool),
    ("vcs_pageview_mode", OptionKind::Text),
    ("style_nav_header_background", OptionKind::Text),
    ("collapse_navigation", OptionKind::Bool),
    ("sticky_navigation", OptionKind::Bool),
    ("navigation_depth", OptionKind::Integer),
    ("includehidden", OptionKind::Bool),
    ("titles_only", OptionKind::Bool),
];

/// Looks up the expected kind for a theme option key.
#[must_use]
pub fn theme_option_kind(key: &str) -> Option<OptionKind> {
    RECOGNIZED_THEME_OPTIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
}

// ============================================================================
// Intersphinx Mapping
// ============================================================================

/// A cross-project link target: a documentation base URL plus an
/// optional override for the object inventory location.
///
/// Accepts both the compact two-element sequence form
/// `["https://docs.python.org/3/", null]` and the explicit mapping form
/// `{url: ..., inventory: ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntersphinxTarget {
    /// `[base URL, inventory override]` pair.
    Pair(String, Option<String>),

    /// Explicit form with named fields.
    Detailed {
        /// Base URL of the external project's documentation.
        url: String,
        /// Inventory file override; `None` means the conventional
        /// location under the base URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inventory: Option<String>,
    },
}

impl IntersphinxTarget {
    /// The documentation base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Pair(url, _) | Self::Detailed { url, .. } => url,
        }
    }

    /// The inventory override, if any.
    #[must_use]
    pub fn inventory(&self) -> Option<&str> {
        match self {
            Self::Pair(_, inventory) | Self::Detailed { inventory, .. } => inventory.as_deref(),
        }
    }
}

// ============================================================================
// MyST Extensions
// ============================================================================

/// Markdown-dialect extensions understood by the MyST parser.
///
/// Unknown names would be rejected by the generator at build time;
/// validating here moves that failure to config load.
pub const KNOWN_MYST_EXTENSIONS: [&str; 15] = [
    "amsmath",
    "attrs_block",
    "attrs_inline",
    "colon_fence",
    "deflist",
    "dollarmath",
    "fieldlist",
    "html_admonition",
    "html_image",
    "linkify",
    "replacements",
    "smartquotes",
    "strikethrough",
    "substitution",
    "tasklist",
];

// ============================================================================
// Defaults
// ============================================================================

impl Default for DocConfig {
    /// The stock Serpent Methylation Pipeline docs configuration.
    ///
    /// This is what `serpent-docs init` writes and what the docs site
    /// builds from when no overrides are given.
    fn default() -> Self {
        Self {
            project: "Serpent Methylation Pipeline".to_string(),
            copyright: Some("2024, Nick Semenkovich".to_string()),
            author: "Nick Semenkovich".to_string(),
            release: "1.0.0".to_string(),
            extensions: vec![
                "sphinx.ext.autodoc".to_string(),
                "sphinx.ext.viewcode".to_string(),
                "sphinx.ext.napoleon".to_string(),
                "sphinx.ext.intersphinx".to_string(),
                "sphinx.ext.githubpages".to_string(),
                "myst_parser".to_string(),
            ],
            templates_path: vec!["_templates".to_string()],
            exclude_patterns: vec![
                "_build".to_string(),
                "Thumbs.db".to_string(),
                ".DS_Store".to_string(),
            ],
            static_path: vec!["_static".to_string()],
            theme: "sphinx_rtd_theme".to_string(),
            theme_options: default_theme_options(),
            logo_path: Some(PathBuf::from("../serpent-logo.png")),
            intersphinx_mapping: default_intersphinx_mapping(),
            myst_extensions: vec![
                "amsmath".to_string(),
                "colon_fence".to_string(),
                "deflist".to_string(),
                "dollarmath".to_string(),
                "html_admonition".to_string(),
                "html_image".to_string(),
                "linkify".to_string(),
                "replacements".to_string(),
                "smartquotes".to_string(),
                "substitution".to_string(),
                "tasklist".to_string(),
            ],
        }
    }
}

fn default_theme_options() -> IndexMap<String, ThemeOptionValue> {
    [
        ("canonical_url", ThemeOptionValue::Text(String::new())),
        ("analytics_id", ThemeOptionValue::Text(String::new())),
        ("logo_only", ThemeOptionValue::Bool(false)),
        ("display_version", ThemeOptionValue::Bool(true)),
        (
            "prev_next_buttons_location",
            ThemeOptionValue::Text("bottom".to_string()),
        ),
        ("style_external_links", ThemeOptionValue::Bool(false)),
        ("vcs_pageview_mode", ThemeOptionValue::Text(String::new())),
        (
            "style_nav_header_background",
            ThemeOptionValue::Text("#2980B9".to_string()),
        ),
        ("collapse_navigation", ThemeOptionValue::Bool(true)),
        ("sticky_navigation", ThemeOptionValue::Bool(true)),
        ("navigation_depth", ThemeOptionValue::Integer(4)),
        ("includehidden", ThemeOptionValue::Bool(true)),
        ("titles_only", ThemeOptionValue::Bool(false)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn default_intersphinx_mapping() -> IndexMap<String, IntersphinxTarget> {
    [
        (
            "python",
            IntersphinxTarget::Pair("https://docs.python.org/3/".to_string(), None),
        ),
        (
            "snakemake",
            IntersphinxTarget::Pair("https://snakemake.readthedocs.io/en/stable/".to_string(), None),
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

// ============================================================================
// Tests
// ============================================================================
