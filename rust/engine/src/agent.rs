use thiserror::Error;

use crate::errors::MoveError;
use crate::moves::Move;
use crate::rules::LegalMoves;
use crate::snapshot::StateSnapshot;

/// Failure reported by an agent instead of a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Agent built an invalid move: {0}")]
    Construction(#[from] MoveError),
    #[error("Agent failed: {0}")]
    Failed(String),
}

/// A decision-maker occupying one seat.
///
/// `decide` runs on a blocking worker under a deadline and may be abandoned
/// mid-call, so implementations must not hold state that a lost call would
/// leave inconsistent. Whatever it returns is checked against `legal` before
/// it reaches the table.
///
/// # Example Implementation
///
/// ```rust
/// use tablejudge_engine::agent::{Agent, AgentError};
/// use tablejudge_engine::moves::Move;
/// use tablejudge_engine::rules::LegalMoves;
/// use tablejudge_engine::snapshot::StateSnapshot;
///
/// struct AlwaysCall;
///
/// impl Agent for AlwaysCall {
///     fn decide(&self, _: &StateSnapshot, legal: &LegalMoves) -> Result<Move, AgentError> {
///         Ok(if legal.can_call() { Move::CALL } else { Move::CHECK })
///     }
///
///     fn name(&self) -> &str {
///         "always-call"
///     }
/// }
/// ```
pub trait Agent: Send + Sync {
    fn decide(&self, snapshot: &StateSnapshot, legal: &LegalMoves) -> Result<Move, AgentError>;

    fn name(&self) -> &str;
}
