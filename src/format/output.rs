use std::path::Path;

use issue_lib::{Issue, IssueId, State, Verb};
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Result of `im init`.
#[derive(Debug, Clone, Serialize)]
pub struct InitOutput<'a> {
    pub path: &'a Path,
    pub created: bool,
}

/// Result of a lifecycle command.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutput<'a> {
    pub verb: Verb,
    pub from: State,
    pub to: State,
    pub issue: &'a Issue,
}

/// Result of `im delete`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutput {
    pub id: IssueId,
    pub deleted: bool,
}

/// Result of `im version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionOutput<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub build: &'a str,
}
