//! CLI argument definitions
//!
//! All Clap derive structs for `serpent-docs` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Documentation build configuration toolkit.
#[derive(Parser, Debug)]
#[command(name = "serpent-docs", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SERPENT_DOCS_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration files without building anything.
    Validate(ValidateArgs),

    /// Load a configuration and print the resolved, validated record.
    Show(ShowArgs),

    /// Write a starter configuration file.
    Init(InitArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Validate Command
// ============================================================================

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,

    /// Root directory for resolving `$include` paths.
    #[arg(long, env = "SERPENT_DOCS_INCLUDE_ROOT")]
    pub include_root: Option<PathBuf>,
}

// ============================================================================
// Show Command
// ============================================================================

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to load.
    pub file: PathBuf,

    /// Output format.
    #[arg(short, long, default_value = "yaml")]
    pub format: ShowFormat,

    /// Root directory for resolving `$include` paths.
    #[arg(long, env = "SERPENT_DOCS_INCLUDE_ROOT")]
    pub include_root: Option<PathBuf>,
}

// ============================================================================
// Init Command
// ============================================================================

/// Arguments for `init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the configuration file in.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Serialization format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// YAML output.
    #[default]
    Yaml,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_with_file() {
        let cli = Cli::try_parse_from(["serpent-docs", "validate", "docs.yaml"]);
        assert!(cli.is_ok(), "Failed to parse: {cli:?}");
    }

    #[test]
    fn test_validate_requires_files() {
        let result = Cli::try_parse_from(["serpent-docs", "validate"]);
        assert!(result.is_err(), "Expected error for missing files");
    }

    #[test]
    fn test_validate_multiple_files() {
        let cli =
            Cli::try_parse_from(["serpent-docs", "validate", "a.yaml", "b.yaml"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.files.len(), 2);
        } else {
            panic!("Expected ValidateArgs");
        }
    }

    #[test]
    fn test_validate_strict_flag() {
        let cli =
            Cli::try_parse_from(["serpent-docs", "validate", "--strict", "docs.yaml"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert!(args.strict);
        } else {
            panic!("Expected ValidateArgs");
        }
    }

    #[test]
    fn test_show_default_format() {
        let cli = Cli::try_parse_from(["serpent-docs", "show", "docs.yaml"]).unwrap();
        if let Commands::Show(args) = cli.command {
            assert_eq!(args.format, ShowFormat::Yaml);
        } else {
            panic!("Expected ShowArgs");
        }
    }

    #[test]
    fn test_show_json_format() {
        let cli =
            Cli::try_parse_from(["serpent-docs", "show", "docs.yaml", "--format", "json"])
                .unwrap();
        if let Commands::Show(args) = cli.command {
            assert_eq!(args.format, ShowFormat::Json);
        } else {
            panic!("Expected ShowArgs");
        }
    }

    #[test]
    fn test_init_default_directory() {
        let cli = Cli::try_parse_from(["serpent-docs", "init"]).unwrap();
        if let Commands::Init(args) = cli.command {
            assert_eq!(args.directory, PathBuf::from("."));
            assert!(!args.force);
        } else {
            panic!("Expected InitArgs");
        }
    }

    #[test]
    fn test_help_output() {
        let result = Cli::try_parse_from(["serpent-docs", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let result = Cli::try_parse_from(["serpent-docs", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli =
                Cli::try_parse_from(["serpent-docs", "--color", variant, "validate", "x.yaml"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["serpent-docs", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["serpent-docs", "-vvv", "validate", "x.yaml"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["serpent-docs", "--quiet", "show", "x.yaml"]).unwrap();
        assert!(cli.quiet);
    }
}
