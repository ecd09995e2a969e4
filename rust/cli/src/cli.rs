use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tablejudge",
    version,
    about = "Texas Hold'em table judge and tournament runner"
)]
pub struct TableJudgeCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table options shared by the commands that play hands. Anything left unset
/// falls back to the configuration file, the environment, then defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Number of seats (2-10)
    #[arg(long)]
    pub seats: Option<usize>,
    /// Starting stack per seat
    #[arg(long)]
    pub buy_in: Option<u32>,
    /// Small blind; half the big blind when omitted
    #[arg(long)]
    pub small_blind: Option<u32>,
    #[arg(long)]
    pub big_blind: Option<u32>,
    /// Seconds each agent gets per decision
    #[arg(long)]
    pub time_limit: Option<f64>,
    /// Comma-separated agent names by seat; missing seats get `random`
    #[arg(long, value_delimiter = ',')]
    pub agents: Vec<String>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write every settled hand to this JSONL file
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Log every action
    #[arg(long)]
    pub display: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play independent games and rank the agents
    Tournament {
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// Hands per game before it is cut off
        #[arg(long)]
        hand_limit: Option<u32>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Play hands on one table without resetting stacks
    Hands {
        #[arg(long, default_value_t = 10)]
        hands: u32,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
