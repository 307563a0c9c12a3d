//! List command implementation.

use std::path::Path;

use anyhow::Result;
use issue_lib::{IssueRow, ListFilters};

use super::open_store;
use crate::cli::ListArgs;
use crate::format::{format_issue_line, print_json, terminal_width, truncate_to_width};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the issue file cannot be loaded.
pub fn execute(path: &Path, args: &ListArgs, json: bool) -> Result<()> {
    let store = open_store(path)?;
    let rows = store.issue_rows(&build_filters(args));

    if json {
        print_json(&rows)?;
    } else if rows.is_empty() {
        println!("No issues found.");
    } else {
        let width = terminal_width();
        for row in &rows {
            println!("{}", render_line(row, width));
        }
        println!("\n{} issue(s)", rows.len());
    }

    Ok(())
}

fn render_line(row: &IssueRow, width: Option<usize>) -> String {
    let line = format_issue_line(row);
    match width {
        Some(width) => truncate_to_width(&line, width),
        None => line,
    }
}

/// Convert CLI args to store filters.
fn build_filters(args: &ListArgs) -> ListFilters {
    ListFilters {
        kinds: (!args.kind.is_empty()).then(|| args.kind.clone()),
        states: (!args.state.is_empty()).then(|| args.state.clone()),
        owner: args.owner.clone(),
        unowned: args.unowned,
        limit: args.limit,
    }
}
