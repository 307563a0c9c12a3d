//! The issue entity.
//!
//! Fields are private: every way of producing an `Issue` goes through the
//! validator, and the only way to change one is [`Issue::apply`].

use serde::Serialize;
use tracing::debug;

use crate::command::{Command, NO_OWNER_MARKER};
use crate::error::{IssueError, Result, ValidationError};
use crate::lifecycle;
use crate::model::{IssueId, IssueKind, Resolution, State};
use crate::validation::{IssueValidator, Workflow};

/// An issue tracked through the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    id: IssueId,
    state: State,
    kind: IssueKind,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<Resolution>,
    notes: Vec<String>,
}

/// Issue fields as they come out of storage, before any validation.
///
/// An empty `owner` (or the `null` marker) and an empty `resolution` mean
/// "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawIssue {
    pub id: IssueId,
    pub state: String,
    pub kind: String,
    pub summary: String,
    pub owner: String,
    pub confirmed: bool,
    pub resolution: String,
    pub notes: Vec<String>,
}

impl Issue {
    /// Create a fresh issue in state `New`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the id is 0, or the summary or note is empty.
    pub fn new(id: IssueId, kind: IssueKind, summary: &str, note: &str) -> Result<Self> {
        crate::command::validate_note(note).map_err(|reason| IssueError::validation("note", reason))?;

        let issue = Self {
            id,
            state: State::New,
            kind,
            summary: summary.to_string(),
            owner: None,
            confirmed: false,
            resolution: None,
            notes: vec![annotate(State::New, note)],
        };
        issue.check()?;
        Ok(issue)
    }

    /// Rebuild an issue from persisted fields, re-checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState`, `InvalidKind`, or `InvalidResolution` for an
    /// unknown name, and `Validation`/`ValidationErrors` for malformed fields
    /// or a violated invariant.
    pub fn reconstruct(raw: RawIssue) -> Result<Self> {
        let state = raw.state.parse::<State>()?;
        let kind = raw.kind.parse::<IssueKind>()?;
        let resolution = if raw.resolution.trim().is_empty() {
            None
        } else {
            Some(raw.resolution.parse::<Resolution>()?)
        };
        let owner = if raw.owner.trim().is_empty() || raw.owner == NO_OWNER_MARKER {
            None
        } else {
            Some(raw.owner)
        };

        let issue = Self {
            id: raw.id,
            state,
            kind,
            summary: raw.summary,
            owner,
            confirmed: raw.confirmed,
            resolution,
            notes: raw.notes,
        };
        issue.check()?;
        Ok(issue)
    }

    #[must_use]
    pub const fn id(&self) -> IssueId {
        self.id
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        self.kind
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    #[must_use]
    pub const fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// History entries, oldest first, each tagged with its origin state.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// The fields the lifecycle rules look at.
    #[must_use]
    pub fn workflow(&self) -> Workflow<'_> {
        Workflow {
            kind: self.kind,
            state: self.state,
            owner: self.owner.as_deref(),
            confirmed: self.confirmed,
            resolution: self.resolution,
        }
    }

    /// Re-check field constraints and lifecycle invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// Every constraint this issue currently violates.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Err(mut e) =
            IssueValidator::validate_fields(self.id, &self.summary, self.owner(), &self.notes)
        {
            errors.append(&mut e);
        }
        if let Err(mut e) = IssueValidator::validate_workflow(&self.workflow()) {
            errors.append(&mut e);
        }
        errors
    }

    fn check(&self) -> Result<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(IssueError::from_validation_errors(errors))
        }
    }

    /// Apply a command, moving the issue to its next state.
    ///
    /// On success the command's note is appended as `"[<prior state>] <note>"`.
    /// On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedTransition` if the current state does not accept
    /// the command, or if accepting it would break an invariant.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        let verb = command.verb();
        let current = self.workflow();
        let transition = lifecycle::plan(&current, &command)?;
        let next = transition.outcome(current);

        if let Err(errors) = IssueValidator::validate_workflow(&next) {
            debug!(
                id = self.id,
                %verb,
                from = %transition.from,
                to = %transition.to,
                ?errors,
                "Transition rejected: result would violate issue invariants"
            );
            return Err(IssueError::UnsupportedTransition {
                state: transition.from,
                verb,
            });
        }

        let from = transition.from;
        let owner = next.owner.map(str::to_string);
        let (state, confirmed, resolution) = (next.state, next.confirmed, next.resolution);

        self.owner = owner;
        self.state = state;
        self.confirmed = confirmed;
        self.resolution = resolution;
        self.notes.push(annotate(from, &command.into_note()));

        debug!(id = self.id, %verb, %from, to = %state, "Issue transitioned");
        Ok(())
    }

    /// Serialize as one issue-file record: a `*` header line followed by one
    /// `-` line per history entry.
    #[must_use]
    pub fn to_record(&self) -> String {
        let mut out = format!(
            "*{},{},{},{},{},{},{}\n",
            self.id,
            self.state,
            self.kind,
            self.summary,
            self.owner.as_deref().unwrap_or(NO_OWNER_MARKER),
            self.confirmed,
            self.resolution.map_or("", Resolution::as_str),
        );
        for note in &self.notes {
            out.push('-');
            out.push_str(note);
            out.push('\n');
        }
        out
    }
}

fn annotate(state: State, note: &str) -> String {
    format!("[{state}] {note}")
}
