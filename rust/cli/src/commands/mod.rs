//! Command handlers.
//!
//! Each command lives in its own module and exposes
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, writing results to
//! the injected `out` stream and warnings to `err`. The helpers below are
//! shared by the commands that seat agents at a table.

mod cfg;
mod hands;
mod tournament;

pub use cfg::handle_cfg_command;
pub use hands::handle_hands_command;
pub use tournament::handle_tournament_command;

use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tablejudge_ai::{create_agent, Agent};
use tablejudge_engine::judge::Judge;
use tablejudge_engine::logger::HandLogger;

use crate::cli::TableArgs;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Agent threads still running past their deadline get this long after the
/// run before the runtime is dropped under them.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Resolves the configuration with the command's flags applied.
fn resolve_config(
    args: &TableArgs,
    hand_limit: Option<u32>,
    err: &mut dyn Write,
) -> Result<Config, CliError> {
    let mut resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };
    resolved.apply_args(args)?;
    resolved.apply_hand_limit(hand_limit)?;
    Ok(resolved.config)
}

/// One agent per seat; seats beyond the configured list get `random`.
fn build_agents(cfg: &Config, seed: u64, err: &mut dyn Write) -> Result<Vec<Arc<dyn Agent>>, CliError> {
    if cfg.agents.len() < cfg.seats {
        ui::display_warning(
            err,
            &format!(
                "{} of {} seats have no agent; filling with random",
                cfg.seats - cfg.agents.len(),
                cfg.seats
            ),
        )?;
    }
    (0..cfg.seats)
        .map(|seat| {
            let name = cfg.agents.get(seat).map(String::as_str).unwrap_or("random");
            create_agent(name, seed.wrapping_add(seat as u64)).map_err(CliError::from)
        })
        .collect()
}

/// Seats the configured agents and attaches the hand log when requested.
fn build_judge(cfg: &Config, args: &TableArgs, err: &mut dyn Write) -> Result<Judge, CliError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let agents = build_agents(cfg, seed, err)?;
    let mut judge_cfg = cfg.judge_config();
    judge_cfg.seed = Some(seed);
    let judge = Judge::new(agents, judge_cfg)?;
    match &args.output {
        Some(path) => Ok(judge.with_hand_log(HandLogger::create(path)?)),
        None => Ok(judge),
    }
}

/// Drives `fut` on a multi-threaded runtime, giving up on Ctrl+C.
fn run_interruptible<F, T>(fut: F) -> Result<T, CliError>
where
    F: Future<Output = Result<T, CliError>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(async {
        tokio::select! {
            r = fut => r,
            Ok(()) = tokio::signal::ctrl_c() => Err(CliError::Interrupted("stopped by Ctrl+C".to_string())),
        }
    });
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}
