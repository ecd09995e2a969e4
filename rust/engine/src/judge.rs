//! Hand, game and tournament loops.
//!
//! The [`Judge`] is the single driver of a [`Table`]: it asks each acting
//! seat's agent for a move through the [`DecisionGateway`], applies it, and
//! accumulates rewards and standings.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::errors::EngineError;
use crate::game::{chip_leader, DecisionStats, GameSummary, Standings};
use crate::gateway::{Decision, DecisionGateway};
use crate::logger::{HandLogger, HandRecord};
use crate::phase::HandPhase;
use crate::table::{Blinds, HandOutcome, Table};

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeConfig {
    pub buy_in: u32,
    /// `None` means half the big blind
    pub small_blind: Option<u32>,
    pub big_blind: u32,
    pub time_limit: Duration,
    /// Hands per game before it is cut off; `None` plays to a single survivor
    pub hand_limit: Option<u32>,
    /// Log every action at info level
    pub display: bool,
    /// Deck seed; random when absent
    pub seed: Option<u64>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            buy_in: 500,
            small_blind: None,
            big_blind: 10,
            time_limit: Duration::from_secs(2),
            hand_limit: Some(1000),
            display: false,
            seed: None,
        }
    }
}

impl JudgeConfig {
    pub fn blinds(&self) -> Blinds {
        match self.small_blind {
            Some(small) => Blinds {
                small,
                big: self.big_blind,
            },
            None => Blinds::from_big(self.big_blind),
        }
    }

    pub fn validate(&self, seats: usize) -> Result<(), EngineError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(EngineError::InvalidConfig(format!(
                "seat count must be between {} and {}, got {}",
                MIN_SEATS, MAX_SEATS, seats
            )));
        }
        if self.buy_in == 0 {
            return Err(EngineError::InvalidConfig(
                "buy-in must be positive".to_string(),
            ));
        }
        if self.big_blind == 0 {
            return Err(EngineError::InvalidConfig(
                "big blind must be positive".to_string(),
            ));
        }
        let blinds = self.blinds();
        if blinds.small > blinds.big {
            return Err(EngineError::InvalidConfig(format!(
                "small blind {} exceeds big blind {}",
                blinds.small, blinds.big
            )));
        }
        if self.time_limit.is_zero() {
            return Err(EngineError::InvalidConfig(
                "time limit must be positive".to_string(),
            ));
        }
        if self.hand_limit == Some(0) {
            return Err(EngineError::InvalidConfig(
                "hand limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One gateway decision, as applied to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEvent {
    pub seat: usize,
    pub phase: HandPhase,
    pub decision: Decision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandReport {
    pub outcome: HandOutcome,
    /// Compact history line including the closing result
    pub history: String,
    #[serde(skip)]
    pub decisions: Vec<DecisionEvent>,
}

pub struct Judge {
    agents: Vec<Arc<dyn Agent>>,
    config: JudgeConfig,
    table: Table,
    gateway: DecisionGateway,
    rewards: Vec<u64>,
    stats: Vec<DecisionStats>,
    hand_log: Option<HandLogger>,
    game: u32,
}

impl Judge {
    pub fn new(agents: Vec<Arc<dyn Agent>>, config: JudgeConfig) -> Result<Self, EngineError> {
        config.validate(agents.len())?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let n = agents.len();
        Ok(Self {
            table: Table::new(n, config.buy_in, config.blinds(), seed),
            gateway: DecisionGateway::new(config.time_limit),
            rewards: vec![0; n],
            stats: vec![DecisionStats::default(); n],
            agents,
            config,
            hand_log: None,
            game: 0,
        })
    }

    /// Every settled hand is also written to `logger`.
    pub fn with_hand_log(mut self, logger: HandLogger) -> Self {
        self.hand_log = Some(logger);
        self
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn rewards(&self) -> &[u64] {
        &self.rewards
    }
    pub fn stats(&self) -> &[DecisionStats] {
        &self.stats
    }
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    /// Plays one hand on the current stacks.
    pub async fn run_hand(&mut self) -> Result<HandReport, EngineError> {
        self.table.start_hand()?;
        let mut decisions = Vec::new();
        loop {
            while let Some(seat) = self.table.next_actor() {
                let snapshot = self.table.snapshot(seat)?;
                let legal = self.table.legal_moves(seat)?;
                let phase = snapshot.phase;
                let agent = Arc::clone(&self.agents[seat]);
                let decision = self.gateway.decide(agent, snapshot, legal).await;
                self.stats[seat].record(&decision.outcome);
                self.table.apply_move(seat, decision.mv)?;
                if self.config.display {
                    info!(
                        seat,
                        agent = self.agents[seat].name(),
                        phase = ?phase,
                        mv = %decision.mv,
                        pot = self.table.pot(),
                        "action"
                    );
                }
                decisions.push(DecisionEvent {
                    seat,
                    phase,
                    decision,
                });
            }
            if self.table.end_round()? == HandPhase::Settle {
                break;
            }
        }

        let outcome = self.table.settle()?;
        for (r, s) in self.rewards.iter_mut().zip(self.table.seats()) {
            *r += s.chips() as u64;
        }
        if self.config.display {
            info!(
                hand = outcome.hand_number,
                winners = ?outcome.winners,
                pot = outcome.pot,
                board = %crate::cards::format_cards(&outcome.board),
                "hand settled"
            );
        } else {
            debug!(hand = outcome.hand_number, winners = ?outcome.winners, "hand settled");
        }
        self.log_hand(&outcome)?;

        Ok(HandReport {
            history: outcome.history.encode(),
            outcome,
            decisions,
        })
    }

    /// Plays up to `n` hands without resetting stacks.
    pub async fn run_hands(&mut self, n: u32) -> Result<Vec<HandReport>, EngineError> {
        let mut reports = Vec::with_capacity(n as usize);
        for _ in 0..n {
            if self.table.seats_with_chips() < MIN_SEATS {
                warn!(
                    played = reports.len(),
                    requested = n,
                    "fewer than two seats have chips, stopping"
                );
                break;
            }
            reports.push(self.run_hand().await?);
        }
        Ok(reports)
    }

    /// Resets stacks and rewards, then plays until one seat holds all chips or
    /// `hand_limit` hands were played.
    pub async fn run_game(&mut self, hand_limit: Option<u32>) -> Result<GameSummary, EngineError> {
        self.game += 1;
        self.table.reset(self.config.buy_in);
        self.rewards.iter_mut().for_each(|r| *r = 0);

        let mut hands = 0u32;
        let mut truncated = false;
        while self.table.seats_with_chips() >= MIN_SEATS {
            if hand_limit.is_some_and(|limit| hands >= limit) {
                warn!(
                    game = self.game,
                    hands,
                    chips = ?self.table.chips(),
                    "hand limit reached, game truncated"
                );
                truncated = true;
                break;
            }
            self.run_hand().await?;
            hands += 1;
        }

        let chips = self.table.chips();
        let winner = chip_leader(&chips);
        info!(game = self.game, winner, hands, truncated, "game finished");
        Ok(GameSummary {
            game: self.game,
            hands_played: hands,
            chips,
            winner,
            truncated,
        })
    }

    /// Runs `games` independent games and ranks the seats.
    pub async fn run_tournament(&mut self, games: u32) -> Result<Standings, EngineError> {
        let mut standings = Standings::new(&self.agent_names());
        self.stats.iter_mut().for_each(|s| *s = DecisionStats::default());
        for _ in 0..games {
            let summary = self.run_game(self.config.hand_limit).await?;
            standings.record_game(&summary, &self.rewards);
        }
        standings.set_stats(&self.stats);
        Ok(standings)
    }

    fn log_hand(&mut self, outcome: &HandOutcome) -> Result<(), EngineError> {
        let Some(logger) = self.hand_log.as_mut() else {
            return Ok(());
        };
        let record = HandRecord {
            hand_id: logger.next_id(),
            game: self.game,
            seed: self.table.seed(),
            moves: outcome.history.moves().to_vec(),
            board: outcome.board.clone(),
            pot: outcome.pot,
            winners: outcome.winners.clone(),
            showdown: outcome.showdown,
            chips: outcome.chips.clone(),
            history: outcome.history.encode(),
            ts: None,
        };
        logger
            .write(&record)
            .map_err(|e| EngineError::HandLog(e.to_string()))
    }
}
