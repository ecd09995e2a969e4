//! `tournament`: independent games, stacks reset each game, agents ranked by
//! wins then total chips.

use std::io::Write;

use crate::cli::TableArgs;
use crate::error::CliError;
use crate::formatters::format_standings;
use crate::ui;

use super::{build_judge, resolve_config, run_interruptible};

pub fn handle_tournament_command(
    games: u32,
    hand_limit: Option<u32>,
    args: &TableArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let cfg = resolve_config(args, hand_limit, err)?;
    let mut judge = build_judge(&cfg, args, err)?;

    let standings = run_interruptible(async {
        judge
            .run_tournament(games)
            .await
            .map_err(CliError::from)
    })?;

    let truncated = standings.games().iter().filter(|g| g.truncated).count();
    if truncated > 0 {
        ui::display_warning(
            err,
            &format!(
                "{} of {} games hit the {}-hand limit; winners decided by chip count",
                truncated, games, cfg.hand_limit
            ),
        )?;
    }
    writeln!(out, "{}", format_standings(&standings))?;
    if let Some(path) = &args.output {
        writeln!(out, "Hand log: {}", path.display())?;
    }
    Ok(())
}
