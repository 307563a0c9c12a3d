use std::path::Path;

use anyhow::{Result, bail};
use issue_lib::IssueStore;

use crate::format::{InitOutput, print_json};

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the file exists (without `force`) or cannot be written.
pub fn execute(path: &Path, force: bool, json: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Issue file already exists at {}; use --force to overwrite",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    IssueStore::new().save_to(path)?;

    let shown = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if json {
        print_json(&InitOutput {
            path: &shown,
            created: true,
        })?;
    } else {
        println!("Initialized empty issue file at {}", shown.display());
    }
    Ok(())
}
