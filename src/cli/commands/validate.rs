//! Configuration validation command
//!
//! Implements `validate`: loads each file through the full pipeline and
//! reports every issue found, in human or JSON format.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::loader::{ConfigLoader, LoaderOptions};
use crate::error::{ConfigError, SerpentDocsError, ValidationIssue};

/// Validation report for a single configuration file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    errors: Vec<IssueReport>,
    warnings: Vec<IssueReport>,
}

/// A single issue in a JSON validation report.
#[derive(Debug, Serialize)]
struct IssueReport {
    path: String,
    message: String,
}

impl From<&ValidationIssue> for IssueReport {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            path: issue.path.clone(),
            message: issue.message.clone(),
        }
    }
}

/// Validate configuration files without building anything.
///
/// # Errors
///
/// Returns `ConfigError::ValidationFailed` if any file fails validation,
/// or an I/O error if report serialization fails.
pub fn run(args: &ValidateArgs) -> Result<(), SerpentDocsError> {
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        tracing::info!(file = %path.display(), "validating configuration");

        let options = args.include_root.as_ref().map_or_else(
            LoaderOptions::default,
            |root| LoaderOptions {
                include_root: root.clone(),
                ..LoaderOptions::default()
            },
        );
        let mut loader = ConfigLoader::new(options);

        let report = match loader.load(path) {
            Ok(result) => {
                let warnings: Vec<IssueReport> = result
                    .warnings
                    .iter()
                    .map(|w| IssueReport {
                        path: w.location.clone().unwrap_or_else(|| "<file>".to_string()),
                        message: w.message.clone(),
                    })
                    .collect();

                // Strict mode turns warnings into failures
                let (errors, warnings, valid) = if args.strict && !warnings.is_empty() {
                    (warnings, Vec::new(), false)
                } else {
                    (Vec::new(), warnings, true)
                };

                FileReport {
                    file: path.display().to_string(),
                    valid,
                    errors,
                    warnings,
                }
            }
            Err(ConfigError::ValidationError { errors, .. }) => FileReport {
                file: path.display().to_string(),
                valid: false,
                errors: errors.iter().map(IssueReport::from).collect(),
                warnings: Vec::new(),
            },
            Err(other) => FileReport {
                file: path.display().to_string(),
                valid: false,
                errors: vec![IssueReport {
                    path: "<file>".to_string(),
                    message: other.to_string(),
                }],
                warnings: Vec::new(),
            },
        };

        reports.push(report);
    }

    match args.format {
        OutputFormat::Human => print_human(&reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    if failed > 0 {
        return Err(ConfigError::ValidationFailed { count: failed }.into());
    }

    Ok(())
}

fn print_human(reports: &[FileReport]) {
    for report in reports {
        if report.valid {
            println!("{}: ok", report.file);
        } else {
            println!("{}: FAILED", report.file);
        }

        for error in &report.errors {
            println!("  error: {} at {}", error.message, error.path);
        }
        for warning in &report.warnings {
            println!("  warning: {} at {}", warning.message, warning.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;

    #[test]
    fn test_issue_report_from_validation_issue() {
        let issue = ValidationIssue {
            path: "extensions[1]".to_string(),
            message: "Duplicate extension: 'sphinx.ext.autodoc'".to_string(),
            severity: Severity::Error,
        };
        let report = IssueReport::from(&issue);
        assert_eq!(report.path, "extensions[1]");
        assert!(report.message.contains("Duplicate extension"));
    }

    #[test]
    fn test_file_report_serializes() {
        let report = FileReport {
            file: "docs.yaml".to_string(),
            valid: false,
            errors: vec![IssueReport {
                path: "project".to_string(),
                message: "Project name is required".to_string(),
            }],
            warnings: Vec::new(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "docs.yaml");
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"][0]["path"], "project");
    }
}
