//! Delete command implementation.

use std::path::Path;

use anyhow::Result;
use issue_lib::IssueId;

use super::{open_store, save_if_dirty};
use crate::format::{DeleteOutput, print_json};

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the issue file cannot be loaded or saved, or the
/// issue is not found.
pub fn execute(path: &Path, id: IssueId, json: bool) -> Result<()> {
    let mut store = open_store(path)?;
    let issue = store.delete_issue(id)?;
    save_if_dirty(&mut store)?;

    if json {
        print_json(&DeleteOutput { id, deleted: true })?;
    } else {
        println!("Deleted issue {id}: {}", issue.summary());
    }
    Ok(())
}
