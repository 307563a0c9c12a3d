//! Text formatting functions for `im`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - State icons (○ ◐ ● ◎ ✓)
//! - Kind badges ([bug], [enhancement])
//! - Issue line and detail formatting

use std::fmt::Write as _;
use std::io::IsTerminal;

use issue_lib::{Issue, IssueKind, IssueRow, Resolution, State};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// State icon characters.
pub mod icons {
    /// New - reported, nobody on it (hollow circle).
    pub const NEW: &str = "○";
    /// Working - someone owns it (half-filled).
    pub const WORKING: &str = "◐";
    /// Confirmed - reproduced bug waiting for an owner (filled circle).
    pub const CONFIRMED: &str = "●";
    /// Verifying - fix waiting for verification (bullseye).
    pub const VERIFYING: &str = "◎";
    /// Closed - resolved (checkmark).
    pub const CLOSED: &str = "✓";
}

const ELLIPSIS: char = '…';

/// Return the icon character for a state.
#[must_use]
pub const fn format_state_icon(state: State) -> &'static str {
    match state {
        State::New => icons::NEW,
        State::Working => icons::WORKING,
        State::Confirmed => icons::CONFIRMED,
        State::Verifying => icons::VERIFYING,
        State::Closed => icons::CLOSED,
    }
}

/// Format issue kind as a bracketed badge.
#[must_use]
pub fn format_kind_badge(kind: IssueKind) -> String {
    format!("[{}]", kind.as_str().to_lowercase())
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} [{state}] [{kind}] {summary}`
#[must_use]
pub fn format_issue_line(row: &IssueRow) -> String {
    format!(
        "{} {} [{}] {} {}",
        format_state_icon(row.state),
        row.id,
        row.state,
        format_kind_badge(row.kind),
        row.summary,
    )
}

/// Format an issue with all of its fields and history.
#[must_use]
pub fn format_issue_details(issue: &Issue) -> String {
    let mut out = format_issue_line(&IssueRow::from(issue));
    out.push('\n');

    let _ = writeln!(out, "Owner:      {}", issue.owner().unwrap_or("-"));
    if issue.kind() == IssueKind::Bug {
        let confirmed = if issue.is_confirmed() { "yes" } else { "no" };
        let _ = writeln!(out, "Confirmed:  {confirmed}");
    }
    let _ = writeln!(
        out,
        "Resolution: {}",
        issue.resolution().map_or("-", Resolution::as_str)
    );

    out.push_str("History:\n");
    for note in issue.notes() {
        let mut lines = note.lines();
        if let Some(first) = lines.next() {
            let _ = writeln!(out, "  {first}");
        }
        for line in lines {
            let _ = writeln!(out, "    {line}");
        }
    }
    out
}

/// Shorten `line` to at most `max_width` terminal columns.
///
/// Truncated lines end with an ellipsis.
#[must_use]
pub fn truncate_to_width(line: &str, max_width: usize) -> String {
    if line.width() <= max_width {
        return line.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

/// Width of the terminal stdout is attached to, if it is one.
#[must_use]
pub fn terminal_width() -> Option<usize> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| usize::from(cols))
        .filter(|&cols| cols > 0)
}
