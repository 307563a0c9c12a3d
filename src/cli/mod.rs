//! Command-line interface for `im`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use issue_lib::{IssueError, IssueId, IssueKind, Resolution, State, Verb};
use tracing::debug;

use crate::config::{CliOverrides, Config, FILE_ENV};
use crate::logging;

/// `im` - Issue lifecycle tracker.
#[derive(Parser, Debug)]
#[command(name = "im")]
#[command(
    author,
    version,
    about = "Issue lifecycle tracker (plain-text record file)",
    long_about = None,
    after_help = "Bugs: New -> Confirmed -> Working -> Verifying -> Closed. \
                  Enhancements skip Confirmed."
)]
pub struct Cli {
    /// Issue file to operate on
    #[arg(long, global = true, env = FILE_ENV, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// YAML config file (default: .issues.yaml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty issue file
    Init(InitArgs),

    /// Report a new issue
    Add(AddArgs),

    /// List issues
    List(ListArgs),

    /// Show issue details and history
    Show(IdArgs),

    /// Take ownership of an issue
    Assign(AssignArgs),

    /// Confirm a new bug
    Confirm(NoteArgs),

    /// Resolve an issue
    Resolve(ResolveArgs),

    /// Accept a fix under verification
    Verify(NoteArgs),

    /// Reopen a closed issue or reject a fix
    Reopen(NoteArgs),

    /// Delete an issue
    Delete(IdArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing issue file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// One-line summary
    pub summary: String,

    /// Issue kind: bug or enhancement
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: IssueKind,

    /// Initial note
    #[arg(short, long)]
    pub note: String,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only these kinds (repeatable)
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Vec<IssueKind>,

    /// Only these states (repeatable)
    #[arg(short, long, value_parser = parse_state)]
    pub state: Vec<State>,

    /// Only issues owned by this id
    #[arg(long, conflicts_with = "unowned")]
    pub owner: Option<String>,

    /// Only issues without an owner
    #[arg(long)]
    pub unowned: bool,

    /// Maximum number of issues to show
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Issue id
    pub id: IssueId,
}

#[derive(Args, Debug)]
pub struct NoteArgs {
    /// Issue id
    pub id: IssueId,

    /// Note recorded in the issue history
    #[arg(short, long)]
    pub note: String,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    #[command(flatten)]
    pub target: NoteArgs,

    /// New owner id
    #[arg(short, long)]
    pub owner: String,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub target: NoteArgs,

    /// Fixed, Duplicate, WontFix, or WorksForMe
    #[arg(short, long, value_parser = parse_resolution)]
    pub resolution: Resolution,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

fn parse_kind(s: &str) -> std::result::Result<IssueKind, String> {
    s.parse().map_err(|e: IssueError| e.to_string())
}

fn parse_state(s: &str) -> std::result::Result<State, String> {
    s.parse().map_err(|e: IssueError| e.to_string())
}

fn parse_resolution(s: &str) -> std::result::Result<Resolution, String> {
    s.parse().map_err(|e: IssueError| e.to_string())
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        config_path: cli.config.clone(),
        data_file: cli.file.clone(),
    };
    let config = Config::load(&overrides)?;

    logging::init_logging(cli.verbose, cli.quiet, config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    debug!(data_file = %config.data_file.display(), "Resolved configuration");

    let path = config.data_file.as_path();
    let json = cli.json;

    match cli.command {
        Some(Commands::Init(args)) => commands::init::execute(path, args.force, json),
        Some(Commands::Add(args)) => commands::add::execute(path, &args, json),
        Some(Commands::List(args)) => commands::list::execute(path, &args, json),
        Some(Commands::Show(args)) => commands::show::execute(path, args.id, json),
        Some(Commands::Assign(args)) => commands::transition::execute(
            path,
            Verb::Assign,
            &args.target,
            Some(&args.owner),
            None,
            json,
        ),
        Some(Commands::Confirm(args)) => {
            commands::transition::execute(path, Verb::Confirm, &args, None, None, json)
        }
        Some(Commands::Resolve(args)) => commands::transition::execute(
            path,
            Verb::Resolve,
            &args.target,
            None,
            Some(args.resolution),
            json,
        ),
        Some(Commands::Verify(args)) => {
            commands::transition::execute(path, Verb::Verify, &args, None, None, json)
        }
        Some(Commands::Reopen(args)) => {
            commands::transition::execute(path, Verb::Reopen, &args, None, None, json)
        }
        Some(Commands::Delete(args)) => commands::delete::execute(path, args.id, json),
        Some(Commands::Completions(args)) => {
            commands::completions::execute(args.shell);
            Ok(())
        }
        Some(Commands::Version) => commands::version::execute(json),
        None => {
            println!("im - Issue lifecycle tracker. Use --help for usage.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from(["im", "resolve", "4", "-r", "wont-fix", "-n", "Nope"]).unwrap();
        match cli.command {
            Some(Commands::Resolve(args)) => {
                assert_eq!(args.target.id, 4);
                assert_eq!(args.resolution, Resolution::WontFix);
                assert_eq!(args.target.note, "Nope");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "im", "list", "--kind", "bug", "--state", "new", "--state", "Closed", "--unowned",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.kind, vec![IssueKind::Bug]);
                assert_eq!(args.state, vec![State::New, State::Closed]);
                assert!(args.unowned);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["im", "add", "Summary", "--kind", "task", "--note", "x"]).is_err());
    }

    #[test]
    fn test_owner_conflicts_with_unowned() {
        assert!(Cli::try_parse_from(["im", "list", "--owner", "alex", "--unowned"]).is_err());
    }
}
