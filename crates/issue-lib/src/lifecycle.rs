//! The issue lifecycle transition function.
//!
//! `plan` decides, without touching the issue, where a command would take
//! it and which fields change on the way. `Issue::apply` checks the planned
//! result against the invariants and only then commits it.

use crate::command::Command;
use crate::error::{IssueError, Result};
use crate::model::{IssueKind, Resolution, State, Verb};
use crate::validation::Workflow;

/// Field changes that accompany a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect<'c> {
    /// owner := id, resolution := absent.
    Assign(&'c str),
    /// confirmed := true.
    Confirm,
    /// resolution := value.
    Resolve(Resolution),
    /// resolution := absent.
    ClearResolution,
    /// Only the state changes.
    Nothing,
}

/// A planned move between two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'c> {
    pub from: State,
    pub to: State,
    pub effect: Effect<'c>,
}

impl<'c> Transition<'c> {
    const fn new(from: State, to: State, effect: Effect<'c>) -> Self {
        Self { from, to, effect }
    }

    /// The workflow fields the issue would have after this transition.
    #[must_use]
    pub fn outcome<'a>(&self, current: Workflow<'a>) -> Workflow<'a>
    where
        'c: 'a,
    {
        let mut next = Workflow {
            state: self.to,
            ..current
        };
        match self.effect {
            Effect::Assign(owner) => {
                next.owner = Some(owner);
                next.resolution = None;
            }
            Effect::Confirm => next.confirmed = true,
            Effect::Resolve(resolution) => next.resolution = Some(resolution),
            Effect::ClearResolution => next.resolution = None,
            Effect::Nothing => {}
        }
        next
    }
}

/// Decide where `command` takes an issue whose workflow fields are `current`.
///
/// # Errors
///
/// Returns `UnsupportedTransition` if the current state does not accept the
/// command.
pub fn plan<'c>(current: &Workflow<'_>, command: &'c Command) -> Result<Transition<'c>> {
    let from = current.state;
    let unsupported = || IssueError::UnsupportedTransition {
        state: from,
        verb: command.verb(),
    };
    let to = |state: State, effect: Effect<'c>| -> Result<Transition<'c>> {
        Ok(Transition::new(from, state, effect))
    };

    match (from, command.verb()) {
        (State::New | State::Confirmed, Verb::Assign) => {
            if from == State::New && current.kind == IssueKind::Bug {
                return Err(unsupported());
            }
            let owner = command.owner_id().ok_or_else(unsupported)?;
            to(State::Working, Effect::Assign(owner))
        }

        (State::New, Verb::Confirm) if current.kind == IssueKind::Bug => {
            to(State::Confirmed, Effect::Confirm)
        }

        (State::New, Verb::Resolve) => match command.resolution().ok_or_else(unsupported)? {
            Resolution::Fixed => Err(unsupported()),
            Resolution::WorksForMe if current.kind == IssueKind::Enhancement => {
                Err(unsupported())
            }
            resolution => to(State::Closed, Effect::Resolve(resolution)),
        },

        (State::Working, Verb::Resolve) => match command.resolution().ok_or_else(unsupported)? {
            Resolution::Fixed => to(State::Verifying, Effect::Resolve(Resolution::Fixed)),
            Resolution::WorksForMe if current.kind == IssueKind::Enhancement => {
                Err(unsupported())
            }
            resolution => to(State::Closed, Effect::Resolve(resolution)),
        },

        (State::Confirmed, Verb::Resolve) => match command.resolution() {
            Some(Resolution::WontFix) => {
                to(State::Closed, Effect::Resolve(Resolution::WontFix))
            }
            _ => Err(unsupported()),
        },

        (State::Verifying, Verb::Reopen) => to(State::Working, Effect::ClearResolution),
        (State::Verifying, Verb::Verify) => to(State::Closed, Effect::Nothing),

        (State::Closed, Verb::Reopen) => reopen_target(current)
            .ok_or_else(unsupported)
            .map(|state| Transition::new(from, state, Effect::ClearResolution)),

        _ => Err(unsupported()),
    }
}

/// Where a closed issue goes when reopened. Rules are checked in order.
fn reopen_target(current: &Workflow<'_>) -> Option<State> {
    let owned = current.owner.is_some();
    match current.kind {
        IssueKind::Enhancement if owned => Some(State::Working),
        IssueKind::Bug if current.confirmed && owned => Some(State::Working),
        IssueKind::Bug if current.confirmed => Some(State::Confirmed),
        _ if !owned => Some(State::New),
        // An unconfirmed bug that still has an owner has no reopen rule.
        _ => None,
    }
}
