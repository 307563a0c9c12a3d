//! Lifecycle commands: assign, confirm, resolve, verify, reopen.

use std::path::Path;

use anyhow::Result;
use issue_lib::{Command, Resolution, Verb};
use tracing::info;

use super::{open_store, save_if_dirty};
use crate::cli::NoteArgs;
use crate::format::{TransitionOutput, format_state_icon, print_json};

/// Execute a lifecycle command against one issue.
///
/// # Errors
///
/// Returns an error if the command is malformed, the issue file cannot be
/// loaded or saved, the issue is not found, or its state does not accept
/// the command.
pub fn execute(
    path: &Path,
    verb: Verb,
    target: &NoteArgs,
    owner: Option<&str>,
    resolution: Option<Resolution>,
    json: bool,
) -> Result<()> {
    let command = Command::new(verb, owner, resolution, &target.note)?;

    let mut store = open_store(path)?;
    let from = store.get_issue(target.id)?.state();
    store.execute_command(target.id, command)?;
    save_if_dirty(&mut store)?;

    let issue = store.get_issue(target.id)?;
    let to = issue.state();
    info!(id = target.id, %verb, %from, %to, "Applied command");

    if json {
        print_json(&TransitionOutput {
            verb,
            from,
            to,
            issue,
        })?;
    } else {
        println!(
            "{} Issue {}: {from} -> {to}",
            format_state_icon(to),
            target.id
        );
    }
    Ok(())
}
