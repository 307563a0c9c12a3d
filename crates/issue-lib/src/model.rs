//! Closed enumerations shared by commands, issues, and the record format.
//!
//! `as_str` yields the canonical spelling written to issue files.
//! `FromStr` is case-insensitive so operator input and hand-edited files
//! both parse.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IssueError;

/// Issue identifier. Always >= 1 for a constructed issue.
pub type IssueId = u32;

/// Issue classification, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    Bug,
    Enhancement,
}

impl IssueKind {
    pub const ALL: [Self; 2] = [Self::Bug, Self::Enhancement];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::Enhancement => "Enhancement",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueKind {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| IssueError::InvalidKind {
                kind: name.to_string(),
            })
    }
}

/// Workflow state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    New,
    Working,
    Confirmed,
    Verifying,
    Closed,
}

impl State {
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::Working,
        Self::Confirmed,
        Self::Verifying,
        Self::Closed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Working => "Working",
            Self::Confirmed => "Confirmed",
            Self::Verifying => "Verifying",
            Self::Closed => "Closed",
        }
    }

    /// States that must not carry an owner or a resolution.
    #[must_use]
    pub const fn is_unowned(self) -> bool {
        matches!(self, Self::New | Self::Confirmed)
    }

    /// States in which someone is actively responsible for the issue.
    #[must_use]
    pub const fn requires_owner(self) -> bool {
        matches!(self, Self::Working | Self::Verifying)
    }

    /// States that must carry a resolution.
    #[must_use]
    pub const fn requires_resolution(self) -> bool {
        matches!(self, Self::Verifying | Self::Closed)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| IssueError::InvalidState {
                state: name.to_string(),
            })
    }
}

/// Terminal disposition of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    Fixed,
    Duplicate,
    WontFix,
    WorksForMe,
}

impl Resolution {
    pub const ALL: [Self; 4] = [
        Self::Fixed,
        Self::Duplicate,
        Self::WontFix,
        Self::WorksForMe,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Duplicate => "Duplicate",
            Self::WontFix => "WontFix",
            Self::WorksForMe => "WorksForMe",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "wont-fix" / "works_for_me" style spellings from the CLI.
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        Self::ALL
            .into_iter()
            .find(|resolution| resolution.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| IssueError::InvalidResolution {
                resolution: s.trim().to_string(),
            })
    }
}

/// The action requested by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Assign,
    Confirm,
    Resolve,
    Verify,
    Reopen,
}

impl Verb {
    pub const ALL: [Self; 5] = [
        Self::Assign,
        Self::Confirm,
        Self::Resolve,
        Self::Verify,
        Self::Reopen,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Confirm => "confirm",
            Self::Resolve => "resolve",
            Self::Verify => "verify",
            Self::Reopen => "reopen",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| IssueError::InvalidVerb {
                verb: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_parse_back() {
        for state in State::ALL {
            assert_eq!(state.as_str().parse::<State>().unwrap(), state);
        }
        for kind in IssueKind::ALL {
            assert_eq!(kind.as_str().parse::<IssueKind>().unwrap(), kind);
        }
        for resolution in Resolution::ALL {
            assert_eq!(
                resolution.as_str().parse::<Resolution>().unwrap(),
                resolution
            );
        }
        for verb in Verb::ALL {
            assert_eq!(verb.as_str().parse::<Verb>().unwrap(), verb);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("CLOSED".parse::<State>().unwrap(), State::Closed);
        assert_eq!("bug".parse::<IssueKind>().unwrap(), IssueKind::Bug);
        assert_eq!(
            "wont-fix".parse::<Resolution>().unwrap(),
            Resolution::WontFix
        );
        assert_eq!(
            "works_for_me".parse::<Resolution>().unwrap(),
            Resolution::WorksForMe
        );
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!(matches!(
            "Done".parse::<State>(),
            Err(IssueError::InvalidState { .. })
        ));
        assert!(matches!(
            "Task".parse::<IssueKind>(),
            Err(IssueError::InvalidKind { .. })
        ));
        assert!(matches!(
            "".parse::<Resolution>(),
            Err(IssueError::InvalidResolution { .. })
        ));
        assert!(matches!(
            "close".parse::<Verb>(),
            Err(IssueError::InvalidVerb { .. })
        ));
    }

    #[test]
    fn test_state_field_requirements() {
        assert!(State::New.is_unowned());
        assert!(State::Confirmed.is_unowned());
        assert!(State::Working.requires_owner());
        assert!(State::Verifying.requires_owner());
        assert!(State::Verifying.requires_resolution());
        assert!(State::Closed.requires_resolution());
        assert!(!State::Closed.requires_owner());
    }
}
