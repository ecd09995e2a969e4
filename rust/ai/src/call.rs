use tablejudge_engine::agent::{Agent, AgentError};
use tablejudge_engine::moves::Move;
use tablejudge_engine::rules::LegalMoves;
use tablejudge_engine::snapshot::StateSnapshot;

/// Calls every bet and checks when there is nothing to call.
#[derive(Debug, Clone, Default)]
pub struct CallAgent;

impl Agent for CallAgent {
    fn decide(&self, _snapshot: &StateSnapshot, legal: &LegalMoves) -> Result<Move, AgentError> {
        Ok(if legal.can_call() {
            Move::CALL
        } else {
            Move::CHECK
        })
    }

    fn name(&self) -> &str {
        "call"
    }
}
