use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tablejudge_engine::agent::{Agent, AgentError};
use tablejudge_engine::moves::{Move, MoveType};
use tablejudge_engine::rules::LegalMoves;
use tablejudge_engine::snapshot::StateSnapshot;

/// Picks uniformly among the legal move types. Raises go to a random amount
/// between the minimum raise and half the stack above the target.
#[derive(Debug)]
pub struct RandomAgent {
    rng: Mutex<StdRng>,
    no_fold: bool,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            no_fold: false,
        }
    }

    /// Never folds while another move is available.
    pub fn without_fold(mut self) -> Self {
        self.no_fold = true;
        self
    }
}

impl Agent for RandomAgent {
    fn decide(&self, _snapshot: &StateSnapshot, legal: &LegalMoves) -> Result<Move, AgentError> {
        let mut types = legal.move_types();
        if self.no_fold && types.len() > 1 {
            types.retain(|t| *t != MoveType::Fold);
        }
        if types.is_empty() {
            return Ok(legal.fallback());
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AgentError::Failed("random source poisoned".to_string()))?;
        let kind = types[rng.random_range(0..types.len())];
        if kind != MoveType::Raise {
            return Ok(Move::new(kind, None)?);
        }
        let (Some(min), Some(max)) = (legal.min_raise(), legal.max_raise()) else {
            return Ok(legal.fallback());
        };
        let upper = (legal.target_bet + legal.stack / 2).clamp(min, max);
        Ok(Move::raise(rng.random_range(min..=upper))?)
    }

    fn name(&self) -> &str {
        if self.no_fold {
            "random-nofold"
        } else {
            "random"
        }
    }
}
