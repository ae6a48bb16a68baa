//! Command-line parsing for the COVID-19 statistics dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data/transform code.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::data::{CovidClient, DEFAULT_BASE_URL};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "epiwatch", version, about = "Terminal COVID-19 statistics dashboard (disease.sh-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    ///
    /// Two tabs: current global statistics (bar/proportion charts + summary
    /// cards) and the full historical series (line chart + summary cards).
    Tui(FetchArgs),
    /// Fetch the current global snapshot and print its chart summaries.
    Current(FetchArgs),
    /// Fetch the historical series and print the normalized tail.
    History(HistoryArgs),
}

/// Options shared by every command that talks to the API.
#[derive(Debug, Parser, Clone)]
pub struct FetchArgs {
    /// Base URL of the disease.sh API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Transport retry attempts per request (network failures only).
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Fixed spacing between retry attempts, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub retry_delay_ms: u64,
}

impl FetchArgs {
    pub fn client(&self) -> CovidClient {
        CovidClient::new(
            self.base_url.clone(),
            self.retries,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

/// Options for the `history` command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Number of trailing rows to print.
    #[arg(long, default_value_t = 10)]
    pub last: usize,
}
