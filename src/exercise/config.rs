//! Exercise definition schema and loader.
//!
//! Phase thresholds, checklists, canonical step order, and feedback
//! strings are data, not code; they load from a YAML file and are
//! validated before any wizard state is built.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Severity, ValidationIssue};

// ============================================================================
// Schema
// ============================================================================

/// Full exercise definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Exercise title.
    pub title: String,

    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Requirements checklist gating the first phase.
    pub requirements: ChecklistSpec,

    /// Reflection question gating the first phase.
    pub reflection: ResponseSpec,

    /// Drag-and-drop data selection for the second phase.
    pub data_selection: SelectionSpec,

    /// Quality checklist gating the second phase.
    pub quality: ChecklistSpec,

    /// Canonical step order for the third phase.
    pub steps: Vec<String>,

    /// Decision question gating the fourth phase.
    pub decision: ResponseSpec,
}

/// A checklist where every item must be checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSpec {
    /// Item labels, in display order.
    pub items: Vec<String>,
}

/// A select-plus-free-text gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// Select value that counts as the right answer.
    pub expected: String,
    /// Minimum free-text length (exclusive) for the gate to pass.
    pub min_length: usize,
}

/// A single-dropzone selection gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSpec {
    /// Drag payload value that is accepted.
    pub accept: String,
    /// Feedback shown on an accepted drop.
    pub success: String,
    /// Feedback shown on a rejected drop.
    pub failure: String,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            title: "Guided Exercise".to_string(),
            subtitle: None,
            requirements: ChecklistSpec {
                items: vec![
                    "Read the task description".to_string(),
                    "Review the sample data".to_string(),
                    "Identify the success criteria".to_string(),
                    "Note any constraints".to_string(),
                ],
            },
            reflection: ResponseSpec {
                expected: "correct".to_string(),
                min_length: 10,
            },
            data_selection: SelectionSpec {
                accept: "good".to_string(),
                success: "Excellent choice! This example demonstrates the qualities we need."
                    .to_string(),
                failure: "This example lacks the detail we need. Try a different one."
                    .to_string(),
            },
            quality: ChecklistSpec {
                items: vec![
                    "Responses are polite".to_string(),
                    "Responses are specific".to_string(),
                    "Formatting is consistent".to_string(),
                ],
            },
            steps: vec![
                "Prepare the dataset".to_string(),
                "Upload the training file".to_string(),
                "Start the training job".to_string(),
                "Evaluate the results".to_string(),
                "Deploy the model".to_string(),
            ],
            decision: ResponseSpec {
                expected: "correct".to_string(),
                min_length: 20,
            },
        }
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Loads and validates an exercise definition from a YAML file.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is missing, YAML parsing
/// fails, or validation finds errors.
pub fn load(path: &Path) -> Result<ExerciseConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
        path: path.to_path_buf(),
    })?;

    // Handle UTF-8 BOM
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let config: ExerciseConfig =
        serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

    let issues = validate(&config);
    if issues.iter().any(|i| i.severity == Severity::Error) {
        return Err(ConfigError::ValidationError {
            path: path.display().to_string(),
            errors: issues,
        });
    }

    debug!(path = %path.display(), steps = config.steps.len(), "exercise config loaded");
    Ok(config)
}

/// Validates an exercise definition, returning every issue found.
#[must_use]
pub fn validate(config: &ExerciseConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if config.title.trim().is_empty() {
        issues.push(ValidationIssue {
            path: "title".to_string(),
            message: "title is empty".to_string(),
            severity: Severity::Warning,
        });
    }

    if config.requirements.items.is_empty() {
        issues.push(ValidationIssue {
            path: "requirements.items".to_string(),
            message: "requirements checklist has no items".to_string(),
            severity: Severity::Error,
        });
    }

    if config.quality.items.is_empty() {
        issues.push(ValidationIssue {
            path: "quality.items".to_string(),
            message: "quality checklist has no items".to_string(),
            severity: Severity::Error,
        });
    }

    if config.steps.len() < 2 {
        issues.push(ValidationIssue {
            path: "steps".to_string(),
            message: format!("need at least 2 steps to order, got {}", config.steps.len()),
            severity: Severity::Error,
        });
    }

    let mut seen = std::collections::HashSet::new();
    for (index, step) in config.steps.iter().enumerate() {
        if !seen.insert(step.as_str()) {
            issues.push(ValidationIssue {
                path: format!("steps[{index}]"),
                message: format!("duplicate step '{step}'"),
                severity: Severity::Error,
            });
        }
    }

    if config.data_selection.accept.trim().is_empty() {
        issues.push(ValidationIssue {
            path: "data_selection.accept".to_string(),
            message: "accepted drag payload is empty".to_string(),
            severity: Severity::Error,
        });
    }

    for (field, spec) in [
        ("reflection", &config.reflection),
        ("decision", &config.decision),
    ] {
        if spec.expected.trim().is_empty() {
            issues.push(ValidationIssue {
                path: format!("{field}.expected"),
                message: "expected answer is empty".to_string(),
                severity: Severity::Error,
            });
        }
        if spec.min_length == 0 {
            issues.push(ValidationIssue {
                path: format!("{field}.min_length"),
                message: "minimum text length of 0 accepts empty answers".to_string(),
                severity: Severity::Warning,
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(yaml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    const VALID_YAML: &str = r#"
title: Fine-Tuning Walkthrough
subtitle: "Lesson: 2"
requirements:
  items:
    - Read the brief
    - Check the data
reflection:
  expected: correct
  min_length: 10
data_selection:
  accept: good
  success: Nice pick.
  failure: Try again.
quality:
  items:
    - Polite
    - Specific
steps:
  - Prepare
  - Train
  - Deploy
decision:
  expected: correct
  min_length: 20
"#;

    #[test]
    fn test_load_valid_config() {
        let file = write_config(VALID_YAML);
        let config = load(file.path()).unwrap();
        assert_eq!(config.title, "Fine-Tuning Walkthrough");
        assert_eq!(config.subtitle.as_deref(), Some("Lesson: 2"));
        assert_eq!(config.steps.len(), 3);
        assert_eq!(config.requirements.items.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/cellbook-exercise.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_invalid_yaml_reports_parse_error() {
        let file = write_config("title: [unclosed");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_too_few_steps_is_error() {
        let yaml = VALID_YAML.replace("  - Prepare\n  - Train\n  - Deploy\n", "  - Prepare\n");
        let file = write_config(&yaml);
        let err = load(file.path()).unwrap_err();
        match err {
            ConfigError::ValidationError { errors, .. } => {
                assert!(errors.iter().any(|i| i.path == "steps"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_steps_is_error() {
        let yaml = VALID_YAML.replace("  - Deploy\n", "  - Train\n");
        let file = write_config(&yaml);
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn test_zero_min_length_is_warning_only() {
        let yaml = VALID_YAML.replace("min_length: 10", "min_length: 0");
        let file = write_config(&yaml);
        // Warnings do not fail the load.
        let config = load(file.path()).unwrap();
        let issues = validate(&config);
        assert!(issues
            .iter()
            .any(|i| i.severity == Severity::Warning && i.path == "reflection.min_length"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let issues = validate(&ExerciseConfig::default());
        assert!(issues.iter().all(|i| i.severity != Severity::Error));
    }

    #[test]
    fn test_bom_is_stripped() {
        let file = write_config(&format!("\u{feff}{VALID_YAML}"));
        assert!(load(file.path()).is_ok());
    }
}
