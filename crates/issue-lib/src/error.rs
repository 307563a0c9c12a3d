//! Error types for `issue-lib`.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{State, Verb};

/// Primary error type for issue-lib operations.
#[derive(Error, Debug)]
pub enum IssueError {
    // === Construction Errors ===
    /// A command was built with a missing or malformed field.
    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Invalid state name.
    #[error("Invalid state: {state}")]
    InvalidState { state: String },

    /// Invalid issue kind name.
    #[error("Invalid issue kind: {kind}")]
    InvalidKind { kind: String },

    /// Invalid resolution name.
    #[error("Invalid resolution: {resolution}")]
    InvalidResolution { resolution: String },

    /// Invalid command verb name.
    #[error("Invalid verb: {verb}")]
    InvalidVerb { verb: String },

    // === Transition Errors ===
    /// The issue's current state does not accept the command.
    #[error("Cannot {verb} an issue in state {state}")]
    UnsupportedTransition { state: State, verb: Verb },

    // === Store Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: u32 },

    /// Failed to parse a record in an issue file.
    #[error("Record parse error at line {line}: {reason}")]
    RecordParse { line: usize, reason: String },

    /// Generic storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl IssueError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_command(reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for errors raised while building a command or an issue.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCommand { .. }
                | Self::Validation { .. }
                | Self::ValidationErrors { .. }
                | Self::InvalidState { .. }
                | Self::InvalidKind { .. }
                | Self::InvalidResolution { .. }
                | Self::InvalidVerb { .. }
        )
    }
}

/// Result type using `IssueError`.
pub type Result<T> = std::result::Result<T, IssueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_validation_error_is_flattened() {
        let err = IssueError::from_validation_errors(vec![ValidationError::new("id", "too small")]);
        assert!(matches!(err, IssueError::Validation { ref field, .. } if field == "id"));
        assert_eq!(err.to_string(), "Validation failed: id: too small");
    }

    #[test]
    fn test_multiple_validation_errors_are_kept() {
        let err = IssueError::from_validation_errors(vec![
            ValidationError::new("id", "too small"),
            ValidationError::new("summary", "cannot be empty"),
        ]);
        match err {
            IssueError::ValidationErrors { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_transition_message() {
        let err = IssueError::UnsupportedTransition {
            state: State::New,
            verb: Verb::Verify,
        };
        assert_eq!(err.to_string(), "Cannot verify an issue in state New");
        assert!(!err.is_construction_error());
    }
}
