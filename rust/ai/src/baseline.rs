//! Baseline heuristic agent.
//!
//! Rates its holding on a 0-10 scale (a preflop table, the made-hand
//! category after the flop) and maps the rating plus the price of calling to
//! a move. Fully deterministic for a given snapshot.

use tablejudge_engine::agent::{Agent, AgentError};
use tablejudge_engine::cards::Card;
use tablejudge_engine::hand::{rank, Category};
use tablejudge_engine::moves::Move;
use tablejudge_engine::rules::LegalMoves;
use tablejudge_engine::snapshot::StateSnapshot;

/// Rule-based reference agent.
///
/// **Preflop:** premium pairs and big suited aces raise, other strong
/// holdings call, weak holdings fold to any bet.
///
/// **Postflop:** two pair or better bets for value, one pair calls cheap
/// bets, everything else checks or folds.
///
/// # Example
///
/// ```rust
/// use tablejudge_ai::baseline::BaselineAgent;
/// use tablejudge_engine::agent::Agent;
///
/// let agent = BaselineAgent::new();
/// assert_eq!(agent.name(), "baseline");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAgent;

impl BaselineAgent {
    pub fn new() -> Self {
        Self
    }

    /// 10 for AA/KK/AKs down to 2 for unconnected offsuit trash.
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let (r1, r2) = (hole[0].rank as u8, hole[1].rank as u8);
        let (high, low) = (r1.max(r2), r1.min(r2));
        let suited = hole[0].suit == hole[1].suit;

        if high == low {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        let offsuit = match (high, low) {
            (14, 13) => 8,
            (14, 12) => 7,
            (14, 11) | (13, 12) => 6,
            (14, 10) | (13, 11) | (12, 11) => 5,
            (14, _) | (13, 10) | (12, 10) => 4,
            _ if high >= 11 && low >= 9 => 4,
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    4
                } else {
                    3
                }
            }
            _ => 2,
        };
        // suited big cards gain a point, AKs two
        match (suited, high, low) {
            (true, 14, 13) => 10,
            (true, _, _) if offsuit >= 4 => offsuit + 1,
            _ => offsuit,
        }
    }

    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> u8 {
        let strength = rank(&hole, board);
        let base = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker_boost = u8::from(strength.kickers[0] >= 12);
        (base + kicker_boost).min(10)
    }

    /// Share of the final pot this call would represent.
    fn price(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 0.0;
        }
        to_call as f32 / (pot + to_call) as f32
    }

    /// Raise-to amount of roughly `fraction` of the pot over the target,
    /// kept inside the legal range.
    fn sized_raise(legal: &LegalMoves, pot: u32, fraction: f32) -> Option<u32> {
        let min = legal.min_raise()?;
        let max = legal.max_raise()?;
        let extra = ((pot as f32) * fraction) as u32;
        Some((legal.target_bet + extra.max(1)).clamp(min, max))
    }

    fn decide_move(strength: u8, pot: u32, legal: &LegalMoves) -> Result<Move, AgentError> {
        if legal.to_call == 0 {
            let fraction = match strength {
                9..=10 => 2.0 / 3.0,
                7..=8 => 0.5,
                _ => return Ok(Move::CHECK),
            };
            return match Self::sized_raise(legal, pot, fraction) {
                Some(to) => Ok(Move::raise(to)?),
                None => Ok(Move::CHECK),
            };
        }

        // calling puts the whole stack in
        if legal.to_call >= legal.stack {
            return Ok(if strength >= 7 { Move::CALL } else { Move::FOLD });
        }

        let price = Self::price(pot, legal.to_call);
        let mv = match strength {
            9..=10 => match Self::sized_raise(legal, pot, 0.5) {
                Some(to) => Move::raise(to)?,
                None => Move::CALL,
            },
            7..=8 => Move::CALL,
            5..=6 if price <= 0.35 => Move::CALL,
            3..=4 if price <= 0.2 => Move::CALL,
            _ => Move::FOLD,
        };
        Ok(mv)
    }
}

impl Agent for BaselineAgent {
    fn decide(&self, snapshot: &StateSnapshot, legal: &LegalMoves) -> Result<Move, AgentError> {
        let Some(hole) = snapshot.hole else {
            return Ok(legal.fallback());
        };
        let strength = if snapshot.board.len() < 3 {
            Self::preflop_strength(hole)
        } else {
            Self::postflop_strength(hole, &snapshot.board)
        };
        Self::decide_move(strength, snapshot.pot, legal)
    }

    fn name(&self) -> &str {
        "baseline"
    }
}
