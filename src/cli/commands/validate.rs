//! `validate` command: check content and exercise files without
//! rendering or serving anything.
//!
//! Content files are parsed with the real parser and reported on
//! (unknown cell kinds get a did-you-mean suggestion); exercise files
//! go through the YAML loader's validation pass.

use std::path::Path;

use serde_json::json;
use tracing::debug;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::content::document::CellKind;
use crate::content::parser;
use crate::error::{CellbookError, ConfigError, Severity, ValidationIssue};
use crate::exercise::config as exercise_config;

/// Runs the validate command over every given file.
///
/// # Errors
///
/// Returns a [`ConfigError::ValidationError`] for the first file with
/// errors (or, under `--strict`, warnings), after reporting all files.
pub fn run(args: &ValidateArgs) -> Result<(), CellbookError> {
    let mut first_failure: Option<ConfigError> = None;

    for file in &args.files {
        let issues = validate_file(file)?;
        report(file, &issues, args.format);

        let failed = issues.iter().any(|i| {
            i.severity == Severity::Error || (args.strict && i.severity == Severity::Warning)
        });
        if failed && first_failure.is_none() {
            first_failure = Some(ConfigError::ValidationError {
                path: file.display().to_string(),
                errors: issues,
            });
        }
    }

    first_failure.map_or(Ok(()), |err| Err(err.into()))
}

/// Validates one file, routed by extension.
fn validate_file(path: &Path) -> Result<Vec<ValidationIssue>, CellbookError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => Ok(validate_exercise(path)),
        _ => validate_content(path),
    }
}

/// Validates an exercise definition file.
fn validate_exercise(path: &Path) -> Vec<ValidationIssue> {
    match exercise_config::load(path) {
        Ok(config) => exercise_config::validate(&config),
        Err(ConfigError::ValidationError { errors, .. }) => errors,
        Err(e) => vec![ValidationIssue {
            path: "file".to_string(),
            message: e.to_string(),
            severity: Severity::Error,
        }],
    }
}

/// Validates a notebook content file.
fn validate_content(path: &Path) -> Result<Vec<ValidationIssue>, CellbookError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;
    let (doc, parse_issues) = parser::parse_with_report(&raw);
    debug!(path = %path.display(), cells = doc.cells.len(), "content parsed");

    let mut issues: Vec<ValidationIssue> = parse_issues
        .into_iter()
        .map(|issue| ValidationIssue {
            path: format!("line {}", issue.line),
            message: issue.message,
            severity: Severity::Warning,
        })
        .collect();

    for (index, cell) in doc.cells.iter().enumerate() {
        if let CellKind::Unknown(name) = &cell.kind {
            issues.push(ValidationIssue {
                path: format!("cells[{index}]"),
                message: unknown_kind_message(name),
                severity: Severity::Warning,
            });
        }
    }

    if doc.cells.is_empty() {
        issues.push(ValidationIssue {
            path: "document".to_string(),
            message: "no cell headers found; document renders empty".to_string(),
            severity: Severity::Warning,
        });
    }

    Ok(issues)
}

/// Builds the message for an unknown cell kind, with a did-you-mean
/// suggestion when a known kind is close enough.
fn unknown_kind_message(name: &str) -> String {
    let suggestion = CellKind::KNOWN
        .iter()
        .map(|known| (known, strsim::normalized_levenshtein(name, known)))
        .filter(|(_, score)| *score > 0.6)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(known, _)| *known);

    suggestion.map_or_else(
        || format!("unknown cell kind '{name}'; cell renders empty"),
        |known| format!("unknown cell kind '{name}'; did you mean '{known}'?"),
    )
}

/// Prints the report for one file.
fn report(path: &Path, issues: &[ValidationIssue], format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            if issues.is_empty() {
                println!("{}: ok", path.display());
            } else {
                println!("{}: {} issue(s)", path.display(), issues.len());
                for issue in issues {
                    println!("  {issue}");
                }
            }
        }
        OutputFormat::Json => {
            let rendered = json!({
                "file": path.display().to_string(),
                "issues": issues
                    .iter()
                    .map(|i| {
                        json!({
                            "path": i.path,
                            "message": i.message,
                            "severity": match i.severity {
                                Severity::Error => "error",
                                Severity::Warning => "warning",
                            },
                        })
                    })
                    .collect::<Vec<_>>(),
            });
            println!("{rendered}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_suggestion() {
        let message = unknown_kind_message("markdwon");
        assert!(message.contains("did you mean 'markdown'"));
    }

    #[test]
    fn test_unknown_kind_without_close_match() {
        let message = unknown_kind_message("zzzzzz");
        assert!(message.contains("renders empty"));
        assert!(!message.contains("did you mean"));
    }

    #[test]
    fn test_validate_content_flags_unknown_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.md");
        std::fs::write(&path, "## [Markdown]\nok\n## [Markdwon]\noops\n").unwrap();

        let issues = validate_content(&path).unwrap();
        assert!(issues.iter().any(|i| i.path == "cells[1]"));
    }

    #[test]
    fn test_validate_content_flags_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.md");
        std::fs::write(&path, "no headers here\n").unwrap();

        let issues = validate_content(&path).unwrap();
        assert!(issues.iter().any(|i| i.message.contains("no cell headers")));
    }
}
