//! Version command implementation.

use anyhow::Result;

use crate::format::{VersionOutput, print_json};

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if json {
        print_json(&VersionOutput {
            name: "im",
            version,
            build,
        })?;
    } else {
        println!("im version {version} ({build})");
    }
    Ok(())
}
