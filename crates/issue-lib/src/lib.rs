//! `issue-lib` — Issue lifecycle tracking library.
//!
//! Issues move through a fixed workflow (`New`, `Working`, `Confirmed`,
//! `Verifying`, `Closed`) driven by commands. Every transition is checked
//! against the lifecycle invariants before it is applied, so an issue
//! that exists is always valid. Issues live in memory and are persisted
//! in a plain-text record file.
//!
//! # Quick Start
//!
//! ```no_run
//! use issue_lib::{Command, IssueKind, IssueStore, Resolution};
//!
//! let mut store = IssueStore::open("issues.txt").unwrap();
//!
//! let id = store.add_issue(IssueKind::Bug, "Crash on save", "Happens every time").unwrap();
//! store.execute_command(id, Command::confirm("Reproduced").unwrap()).unwrap();
//! store.execute_command(id, Command::assign("alex", "Taking this").unwrap()).unwrap();
//! store.execute_command(id, Command::resolve(Resolution::Fixed, "Patched").unwrap()).unwrap();
//!
//! store.save().unwrap();
//! ```

pub mod command;
pub mod error;
pub mod issue;
pub mod lifecycle;
pub mod model;
pub mod query;
pub mod record;
pub mod store;
pub mod validation;

pub use command::Command;
pub use error::{IssueError, Result, ValidationError};
pub use issue::{Issue, RawIssue};
pub use model::{IssueId, IssueKind, Resolution, State, Verb};
pub use query::{IssueRow, ListFilters};
pub use store::IssueStore;
