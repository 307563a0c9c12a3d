//! Subcommand implementations.
//!
//! Each command loads the issue file, does its work, and saves only when
//! something changed.

pub mod add;
pub mod completions;
pub mod delete;
pub mod init;
pub mod list;
pub mod show;
pub mod transition;
pub mod version;

use std::path::Path;

use anyhow::{Context, Result};
use issue_lib::{IssueError, IssueStore};

/// Open the issue file at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub fn open_store(path: &Path) -> Result<IssueStore> {
    IssueStore::open(path).map_err(|e| match e {
        IssueError::FileNotFound(_) => anyhow::anyhow!(
            "No issue file at {}; run `im init` first",
            path.display()
        ),
        other => anyhow::Error::new(other).context(format!("Failed to load {}", path.display())),
    })
}

/// Write the store back to its file if anything changed.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_if_dirty(store: &mut IssueStore) -> Result<()> {
    if store.is_dirty() {
        store.save().context("Failed to save issue file")?;
        store.clear_dirty();
    }
    Ok(())
}
