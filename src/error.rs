//! Error types for `cellbook`.
//!
//! Exit codes follow Unix conventions; each domain has its own error
//! enum, aggregated into [`CellbookError`] for CLI-level handling.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `cellbook` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration or content validation error
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Content fetch error (transport failure, non-success status)
    pub const FETCH_ERROR: i32 = 4;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `cellbook` operations.
///
/// Aggregates all domain-specific errors and provides a unified
/// interface for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum CellbookError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Content fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CellbookError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Fetch(_) => ExitCode::FETCH_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration and content validation errors.
///
/// Covers exercise definition files (YAML) and the `validate`
/// subcommand's structured findings for notebook content.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Validation failed with one or more issues
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the validated file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found while validating a file.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Location of the problem (e.g., "cells[3]" or "steps")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Validation failure that prevents the file from being used
    Error,
    /// Potential issue that does not prevent loading
    Warning,
}

// ============================================================================
// Fetch Errors
// ============================================================================

/// Content fetch errors for file and HTTP sources.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Local content file not found or unreadable
    #[error("content not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// HTTP request completed with a non-success status
    #[error("failed to load content from {url}: status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Transport-level failure (connection refused, DNS, timeout)
    #[error("transport error for {url}: {message}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying error message
        message: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `cellbook` operations.
pub type Result<T> = std::result::Result<T, CellbookError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::FETCH_ERROR, 4);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: CellbookError = ConfigError::MissingFile {
            path: PathBuf::from("/test"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_fetch_error_exit_code() {
        let err: CellbookError = FetchError::Status {
            url: "http://localhost/content.md".to_string(),
            status: 404,
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::FETCH_ERROR);
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: CellbookError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue {
            path: "cells[2]".to_string(),
            message: "unknown cell kind 'markdwon'".to_string(),
            severity: Severity::Error,
        };
        assert_eq!(
            issue.to_string(),
            "error: unknown cell kind 'markdwon' at cells[2]"
        );
    }

    #[test]
    fn test_validation_issue_warning_display() {
        let issue = ValidationIssue {
            path: "document".to_string(),
            message: "no cells found".to_string(),
            severity: Severity::Warning,
        };
        assert_eq!(issue.to_string(), "warning: no cells found at document");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Transport {
            url: "http://localhost/content.md".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
        assert!(err.to_string().contains("http://localhost/content.md"));
    }
}
