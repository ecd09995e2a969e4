//! # TableJudge CLI Library
//!
//! Command-line front end for the table judge: seats agents at a Hold'em
//! table, runs hands or whole tournaments under a per-decision time limit and
//! reports the results.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec![
//!     "tablejudge", "tournament", "--games", "3", "--agents", "call,baseline", "--seed", "7",
//! ];
//! let code = tablejudge_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `tournament`: play independent games and rank the agents
//! - `hands`: play a run of hands on one table
//! - `cfg`: show the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod logging;
pub mod ui;

use cli::{Commands, TableJudgeCli};
use commands::{handle_cfg_command, handle_hands_command, handle_tournament_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["tournament", "hands", "cfg"];

/// Parses `args`, runs the command and returns the process exit code:
/// [`exit_code::SUCCESS`], [`exit_code::ERROR`] or [`exit_code::INTERRUPTED`].
///
/// # Example
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = tablejudge_cli::run(["tablejudge", "--help"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("tournament"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match TableJudgeCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Tournament {
            games,
            hand_limit,
            table,
        } => handle_tournament_command(games, hand_limit, &table, out, err),
        Commands::Hands { hands, table } => handle_hands_command(hands, &table, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            let _ = ui::display_warning(err, &msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let write_usage = |err: &mut dyn Write| -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "TableJudge CLI")?;
        writeln!(err, "Usage: tablejudge <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: tablejudge --help")
    };
    let _ = write_usage(err);
    exit_code::ERROR
}
