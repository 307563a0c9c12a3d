//! Commands applied to issues.
//!
//! A `Command` is validated when it is built, so the lifecycle code never
//! sees a malformed instruction. Commands are immutable and consumed by
//! `Issue::apply`.

use serde::Serialize;

use crate::error::{IssueError, Result};
use crate::model::{Resolution, Verb};

/// Owner id written to an issue file when an issue has no owner.
pub const NO_OWNER_MARKER: &str = "null";

/// An instruction to move an issue through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    verb: Verb,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<Resolution>,
    note: String,
}

impl Command {
    /// Build a command from possibly-missing parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCommand` if the verb is missing, an assign has no
    /// owner, a resolve has no resolution, or the note is empty.
    pub fn from_parts(
        verb: Option<Verb>,
        owner_id: Option<&str>,
        resolution: Option<Resolution>,
        note: Option<&str>,
    ) -> Result<Self> {
        let verb = verb.ok_or_else(|| IssueError::invalid_command("verb is required"))?;

        let owner_id = owner_id.map(str::trim).filter(|o| !o.is_empty());
        // Only assign writes the owner into an issue; other verbs carry it as given.
        if verb == Verb::Assign {
            let owner = owner_id
                .ok_or_else(|| IssueError::invalid_command("assign requires an owner id"))?;
            validate_owner_id(owner).map_err(IssueError::invalid_command)?;
        }

        if verb == Verb::Resolve && resolution.is_none() {
            return Err(IssueError::invalid_command("resolve requires a resolution"));
        }

        let note = note.unwrap_or_default();
        validate_note(note).map_err(IssueError::invalid_command)?;

        Ok(Self {
            verb,
            owner_id: owner_id.map(str::to_string),
            resolution,
            note: note.to_string(),
        })
    }

    /// Build a command.
    ///
    /// # Errors
    ///
    /// See [`Command::from_parts`].
    pub fn new(
        verb: Verb,
        owner_id: Option<&str>,
        resolution: Option<Resolution>,
        note: &str,
    ) -> Result<Self> {
        Self::from_parts(Some(verb), owner_id, resolution, Some(note))
    }

    /// # Errors
    ///
    /// Returns `InvalidCommand` if the owner or note is invalid.
    pub fn assign(owner_id: &str, note: &str) -> Result<Self> {
        Self::new(Verb::Assign, Some(owner_id), None, note)
    }

    /// # Errors
    ///
    /// Returns `InvalidCommand` if the note is invalid.
    pub fn confirm(note: &str) -> Result<Self> {
        Self::new(Verb::Confirm, None, None, note)
    }

    /// # Errors
    ///
    /// Returns `InvalidCommand` if the note is invalid.
    pub fn resolve(resolution: Resolution, note: &str) -> Result<Self> {
        Self::new(Verb::Resolve, None, Some(resolution), note)
    }

    /// # Errors
    ///
    /// Returns `InvalidCommand` if the note is invalid.
    pub fn verify(note: &str) -> Result<Self> {
        Self::new(Verb::Verify, None, None, note)
    }

    /// # Errors
    ///
    /// Returns `InvalidCommand` if the note is invalid.
    pub fn reopen(note: &str) -> Result<Self> {
        Self::new(Verb::Reopen, None, None, note)
    }

    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    #[must_use]
    pub const fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Consume the command, keeping only its note.
    #[must_use]
    pub fn into_note(self) -> String {
        self.note
    }
}

/// An owner id must fit in one comma-separated header field.
pub(crate) fn validate_owner_id(owner: &str) -> std::result::Result<(), &'static str> {
    if owner.is_empty() {
        return Err("owner id cannot be empty");
    }
    if owner.trim() != owner {
        return Err("owner id cannot start or end with whitespace");
    }
    if owner.contains([',', '\n', '\r']) {
        return Err("owner id cannot contain commas or line breaks");
    }
    if owner == NO_OWNER_MARKER {
        return Err("owner id cannot be 'null'");
    }
    Ok(())
}

/// Note text must survive a write/read cycle through an issue file.
pub(crate) fn validate_note(note: &str) -> std::result::Result<(), &'static str> {
    if note.trim().is_empty() {
        return Err("note cannot be empty");
    }
    if note.contains('\r') {
        return Err("note cannot contain carriage returns");
    }
    for line in note.split('\n').skip(1) {
        if line.trim().is_empty() {
            return Err("note cannot contain blank lines");
        }
        if line.starts_with(['*', '-']) {
            return Err("note continuation lines cannot start with '*' or '-'");
        }
    }
    Ok(())
}
