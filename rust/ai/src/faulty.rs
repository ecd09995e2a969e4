//! Agents that misbehave on purpose, for exercising the decision deadline
//! and move substitution.

use std::sync::Arc;
use std::time::Duration;

use tablejudge_engine::agent::{Agent, AgentError};
use tablejudge_engine::moves::Move;
use tablejudge_engine::rules::LegalMoves;
use tablejudge_engine::snapshot::StateSnapshot;

/// Sleeps for a fixed delay, then answers like the wrapped agent.
pub struct DelayedAgent {
    inner: Arc<dyn Agent>,
    delay: Duration,
    name: String,
}

impl DelayedAgent {
    pub fn new(inner: Arc<dyn Agent>, delay: Duration) -> Self {
        let name = format!("slow:{}:{}", delay.as_millis(), inner.name());
        Self { inner, delay, name }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Agent for DelayedAgent {
    fn decide(&self, snapshot: &StateSnapshot, legal: &LegalMoves) -> Result<Move, AgentError> {
        std::thread::sleep(self.delay);
        self.inner.decide(snapshot, legal)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Answers with a move outside the legal set: a raise to exactly the current
/// target, or a call when there is nothing to call.
#[derive(Debug, Clone, Default)]
pub struct IllegalMoveAgent;

impl Agent for IllegalMoveAgent {
    fn decide(&self, _snapshot: &StateSnapshot, legal: &LegalMoves) -> Result<Move, AgentError> {
        if legal.target_bet == 0 {
            return Ok(Move::CALL);
        }
        Ok(Move::raise(legal.target_bet)?)
    }

    fn name(&self) -> &str {
        "illegal"
    }
}
