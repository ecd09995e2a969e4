//! `cfg`: the resolved configuration as JSON, each value paired with the
//! source it came from (default, file, env).

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seats": { "value": config.seats, "source": sources.seats },
        "buy_in": { "value": config.buy_in, "source": sources.buy_in },
        "small_blind": {
            "value": config.judge_config().blinds().small,
            "source": sources.small_blind,
        },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "time_limit": { "value": config.time_limit, "source": sources.time_limit },
        "hand_limit": { "value": config.hand_limit, "source": sources.hand_limit },
        "seed": { "value": config.seed, "source": sources.seed },
        "display": { "value": config.display, "source": sources.display },
        "agents": { "value": config.agents, "source": sources.agents },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
