//! `issue_manager` (im) - Issue lifecycle tracker
//!
//! Tracks bugs and enhancements through a fixed workflow, persisted in a
//! plain-text record file.

use issue_manager::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
