//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - dispatches to the TUI or the one-shot report commands

use clap::Parser;

use crate::cli::{Command, FetchArgs, HistoryArgs};
use crate::error::AppError;

/// Entry point for the `epiwatch` binary.
pub fn run() -> Result<(), AppError> {
    // We want `epiwatch` and `epiwatch --retries 5` to behave like
    // `epiwatch tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Current(args) => handle_current(args),
        Command::History(args) => handle_history(args),
    }
}

fn handle_current(args: FetchArgs) -> Result<(), AppError> {
    let client = args.client();
    let snapshot = client.fetch_snapshot()?;
    println!("{}", crate::report::format_snapshot_summary(&snapshot));
    Ok(())
}

fn handle_history(args: HistoryArgs) -> Result<(), AppError> {
    let client = args.fetch.client();
    let series = client.fetch_historical()?;
    let points = crate::transform::normalize_history(&series)?;
    println!("{}", crate::report::format_history_summary(&points, args.last));
    Ok(())
}

/// Rewrite argv so `epiwatch` defaults to `epiwatch tui`.
///
/// Rules:
/// - `epiwatch`                      -> `epiwatch tui`
/// - `epiwatch --retries 5 ...`      -> `epiwatch tui --retries 5 ...`
/// - `epiwatch --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "current" | "history");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_the_tui() {
        assert_eq!(rewrite_args(args(&["epiwatch"])), args(&["epiwatch", "tui"]));
        assert_eq!(
            rewrite_args(args(&["epiwatch", "--retries", "5"])),
            args(&["epiwatch", "tui", "--retries", "5"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["epiwatch", "current"])),
            args(&["epiwatch", "current"])
        );
        assert_eq!(
            rewrite_args(args(&["epiwatch", "--help"])),
            args(&["epiwatch", "--help"])
        );
    }
}
