//! Output formatting for `im`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! JSON goes to stdout; diagnostics go to stderr.

mod output;
mod text;

pub use output::{DeleteOutput, InitOutput, TransitionOutput, VersionOutput, print_json};
pub use text::{
    format_issue_details, format_issue_line, format_kind_badge, format_state_icon,
    terminal_width, truncate_to_width,
};
