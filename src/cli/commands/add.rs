//! Add command implementation.

use std::path::Path;

use anyhow::Result;

use super::{open_store, save_if_dirty};
use crate::cli::AddArgs;
use crate::format::print_json;

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the issue file cannot be loaded or saved, or the
/// summary or note is invalid.
pub fn execute(path: &Path, args: &AddArgs, json: bool) -> Result<()> {
    let mut store = open_store(path)?;
    let id = store.add_issue(args.kind, &args.summary, &args.note)?;
    save_if_dirty(&mut store)?;

    let issue = store.get_issue(id)?;
    if json {
        print_json(issue)?;
    } else {
        println!("Created issue {id}: {}", issue.summary());
    }
    Ok(())
}
