//! Query and filter types for issue listings.

use serde::Serialize;

use crate::issue::Issue;
use crate::model::{IssueId, IssueKind, State};

/// Filter options for listing issues.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub kinds: Option<Vec<IssueKind>>,
    pub states: Option<Vec<State>>,
    pub owner: Option<String>,
    /// Only issues with no owner.
    pub unowned: bool,
    pub limit: Option<usize>,
}

impl ListFilters {
    /// Whether `issue` passes every filter that is set.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&issue.kind()) {
                return false;
            }
        }
        if let Some(states) = &self.states {
            if !states.contains(&issue.state()) {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if issue.owner() != Some(owner.as_str()) {
                return false;
            }
        }
        if self.unowned && issue.owner().is_some() {
            return false;
        }
        true
    }
}

/// One row of the tabular issue view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRow {
    pub id: IssueId,
    pub state: State,
    pub kind: IssueKind,
    pub summary: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id(),
            state: issue.state(),
            kind: issue.kind(),
            summary: issue.summary().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    fn assigned_enhancement() -> Issue {
        let mut issue = Issue::new(2, IssueKind::Enhancement, "Dark mode", "Please").unwrap();
        issue.apply(Command::assign("alex", "Mine").unwrap()).unwrap();
        issue
    }

    #[test]
    fn test_default_filters_match_everything() {
        let bug = Issue::new(1, IssueKind::Bug, "Crash", "Boom").unwrap();
        assert!(ListFilters::default().matches(&bug));
        assert!(ListFilters::default().matches(&assigned_enhancement()));
    }

    #[test]
    fn test_kind_and_state_filters() {
        let issue = assigned_enhancement();
        let filters = ListFilters {
            kinds: Some(vec![IssueKind::Bug]),
            ..Default::default()
        };
        assert!(!filters.matches(&issue));

        let filters = ListFilters {
            states: Some(vec![State::New, State::Working]),
            ..Default::default()
        };
        assert!(filters.matches(&issue));
    }

    #[test]
    fn test_owner_filters() {
        let issue = assigned_enhancement();
        let by_owner = |owner: &str| ListFilters {
            owner: Some(owner.to_string()),
            ..Default::default()
        };
        assert!(by_owner("alex").matches(&issue));
        assert!(!by_owner("sam").matches(&issue));

        let unowned = ListFilters {
            unowned: true,
            ..Default::default()
        };
        assert!(!unowned.matches(&issue));
    }

    #[test]
    fn test_row_from_issue() {
        let row = IssueRow::from(&assigned_enhancement());
        assert_eq!(
            row,
            IssueRow {
                id: 2,
                state: State::Working,
                kind: IssueKind::Enhancement,
                summary: "Dark mode".to_string(),
            }
        );
    }
}
