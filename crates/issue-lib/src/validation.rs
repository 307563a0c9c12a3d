//! Validation helpers for issues.
//!
//! These routines enforce the lifecycle invariants and field constraints
//! and return structured validation errors without mutating anything.

use crate::error::ValidationError;
use crate::model::{IssueKind, Resolution, State};

/// The workflow-relevant fields of an issue, borrowed for checking.
///
/// `Issue::apply` builds one of these for the state an issue would move to,
/// so a transition can be checked before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workflow<'a> {
    pub kind: IssueKind,
    pub state: State,
    pub owner: Option<&'a str>,
    pub confirmed: bool,
    pub resolution: Option<Resolution>,
}

/// Validates issue fields and lifecycle invariants.
pub struct IssueValidator;

impl IssueValidator {
    /// Check the lifecycle invariants that must hold for any issue at rest.
    ///
    /// # Errors
    ///
    /// Returns every violated invariant as a `ValidationError`.
    pub fn validate_workflow(w: &Workflow<'_>) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Enhancements are never confirmed, never WorksForMe, never Confirmed.
        if w.kind == IssueKind::Enhancement {
            if w.confirmed {
                errors.push(ValidationError::new(
                    "confirmed",
                    "an enhancement cannot be confirmed",
                ));
            }
            if w.resolution == Some(Resolution::WorksForMe) {
                errors.push(ValidationError::new(
                    "resolution",
                    "an enhancement cannot be resolved WorksForMe",
                ));
            }
            if w.state == State::Confirmed {
                errors.push(ValidationError::new(
                    "state",
                    "an enhancement cannot be in state Confirmed",
                ));
            }
        }

        if w.kind == IssueKind::Bug && w.state.requires_owner() && !w.confirmed {
            errors.push(ValidationError::new(
                "confirmed",
                format!("a bug in state {} must be confirmed", w.state),
            ));
        }

        if w.state.is_unowned() {
            if w.resolution.is_some() {
                errors.push(ValidationError::new(
                    "resolution",
                    format!("state {} cannot have a resolution", w.state),
                ));
            }
            if w.owner.is_some() {
                errors.push(ValidationError::new(
                    "owner",
                    format!("state {} cannot have an owner", w.state),
                ));
            }
        }

        if w.state.requires_resolution() && w.resolution.is_none() {
            errors.push(ValidationError::new(
                "resolution",
                format!("state {} requires a resolution", w.state),
            ));
        }
        if w.state == State::Verifying
            && w.resolution.is_some()
            && w.resolution != Some(Resolution::Fixed)
        {
            errors.push(ValidationError::new(
                "resolution",
                "state Verifying requires resolution Fixed",
            ));
        }

        if w.state.requires_owner() && w.owner.is_none() {
            errors.push(ValidationError::new(
                "owner",
                format!("state {} requires an owner", w.state),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Check the fields an issue is created with.
    ///
    /// # Errors
    ///
    /// Returns every malformed field as a `ValidationError`.
    pub fn validate_fields(
        id: u32,
        summary: &str,
        owner: Option<&str>,
        notes: &[String],
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if id < 1 {
            errors.push(ValidationError::new("id", "must be at least 1"));
        }

        // Summary: required, single line.
        if summary.trim().is_empty() {
            errors.push(ValidationError::new("summary", "cannot be empty"));
        }
        if summary.contains(['\n', '\r']) {
            errors.push(ValidationError::new(
                "summary",
                "cannot contain line breaks",
            ));
        }

        if let Some(owner) = owner {
            if let Err(reason) = crate::command::validate_owner_id(owner) {
                errors.push(ValidationError::new("owner", reason));
            }
        }

        if notes.is_empty() {
            errors.push(ValidationError::new("notes", "at least one note is required"));
        }
        // Every entry must come back unchanged from an issue file.
        for (i, note) in notes.iter().enumerate() {
            if let Err(reason) = crate::command::validate_note(note) {
                errors.push(ValidationError::new(
                    "notes",
                    format!("note {}: {reason}", i + 1),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
