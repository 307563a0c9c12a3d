//! Show command implementation.

use std::path::Path;

use anyhow::Result;
use issue_lib::IssueId;

use super::open_store;
use crate::format::{format_issue_details, print_json};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the issue file cannot be loaded or the issue is not found.
pub fn execute(path: &Path, id: IssueId, json: bool) -> Result<()> {
    let store = open_store(path)?;
    let issue = store.get_issue(id)?;

    if json {
        print_json(issue)?;
    } else {
        print!("{}", format_issue_details(issue));
    }

    Ok(())
}
