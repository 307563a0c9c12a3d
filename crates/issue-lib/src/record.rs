//! Issue file I/O.
//!
//! An issue file is a sequence of records. Each record is a `*` header line
//! followed by one `-` line per history entry:
//!
//! ```text
//! *3,Working,Bug,Crash on save, then load,alex,true,
//! -[New] Crashes every time
//! -[New] Reproduced on 1.2
//! -[Confirmed] Taking this
//! ```
//!
//! Any other non-blank line continues the previous history entry.

use std::ffi::OsString;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{IssueError, Result};
use crate::issue::{Issue, RawIssue};

const RECORD_MARKER: char = '*';
const NOTE_MARKER: char = '-';
const HEADER_FIELDS: usize = 7;

/// Load every issue from an issue file.
///
/// # Errors
///
/// Returns `FileNotFound` if the file does not exist, `Io` if it cannot be
/// read, or `RecordParse` if any record is malformed.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IssueError::FileNotFound(path.to_path_buf())
        } else {
            IssueError::Io(e)
        }
    })?;
    parse(&content)
}

/// Save issues to an issue file with atomic write.
///
/// Writes to `<file>.tmp` and renames it over `path`.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save(path: &Path, issues: &[Issue]) -> Result<()> {
    let tmp_path = tmp_path_for(path);
    let file = fs::File::create(&tmp_path)?;
    let mut writer = BufWriter::new(file);

    for issue in issues {
        writer.write_all(issue.to_record().as_bytes())?;
    }

    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Render issues in issue-file form.
#[must_use]
pub fn render(issues: &[Issue]) -> String {
    issues.iter().map(Issue::to_record).collect()
}

/// Parse issue-file text into issues, in file order.
///
/// # Errors
///
/// Returns `RecordParse` naming the 1-based line of the first bad record.
pub fn parse(content: &str) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    let mut pending: Option<(usize, RawIssue)> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;

        if line.trim().is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix(RECORD_MARKER) {
            if let Some((start, raw)) = pending.take() {
                issues.push(finish(start, raw)?);
            }
            pending = Some((line_num, parse_header(line_num, header)?));
            continue;
        }

        let Some((_, raw)) = pending.as_mut() else {
            return Err(IssueError::RecordParse {
                line: line_num,
                reason: format!("expected a '{RECORD_MARKER}' record header"),
            });
        };

        if let Some(note) = line.strip_prefix(NOTE_MARKER) {
            raw.notes.push(note.to_string());
        } else if let Some(last) = raw.notes.last_mut() {
            last.push('\n');
            last.push_str(line);
        } else {
            return Err(IssueError::RecordParse {
                line: line_num,
                reason: "continuation line before any history entry".to_string(),
            });
        }
    }

    if let Some((start, raw)) = pending {
        issues.push(finish(start, raw)?);
    }

    Ok(issues)
}

fn parse_header(line: usize, header: &str) -> Result<RawIssue> {
    let parse_err = |reason: String| IssueError::RecordParse { line, reason };

    let fields: Vec<&str> = header.split(',').collect();
    if fields.len() < HEADER_FIELDS {
        return Err(parse_err(format!(
            "expected {HEADER_FIELDS} header fields, found {}",
            fields.len()
        )));
    }

    // id, state and kind come from the left; owner, confirmed and resolution
    // from the right. Whatever is left in between is the summary.
    let n = fields.len();
    let id = fields[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| parse_err(format!("invalid issue id '{}'", fields[0].trim())))?;
    let confirmed = match fields[n - 2].trim().to_lowercase().as_str() {
        "true" => true,
        "false" => false,
        other => return Err(parse_err(format!("invalid confirmed flag '{other}'"))),
    };

    Ok(RawIssue {
        id,
        state: fields[1].trim().to_string(),
        kind: fields[2].trim().to_string(),
        summary: fields[3..n - 3].join(","),
        owner: fields[n - 3].trim().to_string(),
        confirmed,
        resolution: fields[n - 1].trim().to_string(),
        notes: Vec::new(),
    })
}

fn finish(line: usize, raw: RawIssue) -> Result<Issue> {
    Issue::reconstruct(raw).map_err(|e| IssueError::RecordParse {
        line,
        reason: e.to_string(),
    })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
