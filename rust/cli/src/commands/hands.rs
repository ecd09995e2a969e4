//! `hands`: a run of hands on one table without resetting stacks.

use std::io::Write;

use crate::cli::TableArgs;
use crate::error::CliError;
use crate::formatters::format_hand_report;
use crate::ui;

use super::{build_judge, resolve_config, run_interruptible};

pub fn handle_hands_command(
    hands: u32,
    args: &TableArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = resolve_config(args, None, err)?;
    let mut judge = build_judge(&cfg, args, err)?;

    let reports = run_interruptible(async { judge.run_hands(hands).await.map_err(CliError::from) })?;

    for report in &reports {
        writeln!(out, "{}", format_hand_report(report))?;
    }
    if (reports.len() as u32) < hands {
        ui::display_warning(
            err,
            &format!(
                "stopped after {} of {} hands: fewer than two seats have chips",
                reports.len(),
                hands
            ),
        )?;
    }
    let names = judge.agent_names();
    for (seat, chips) in judge.table().chips().iter().enumerate() {
        writeln!(
            out,
            "Seat {} ({}): {} chips, reward {}",
            seat,
            names[seat],
            chips,
            judge.rewards()[seat]
        )?;
    }
    Ok(())
}
