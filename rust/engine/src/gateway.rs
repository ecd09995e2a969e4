//! Time-bounded decision requests.
//!
//! Each request runs the agent on a blocking worker and waits at most the
//! configured limit. Late answers are discarded, illegal answers and agent
//! failures are replaced by the seat's fallback move, so the table always
//! receives a legal move within the limit plus scheduling overhead.
//!
//! A seat has at most one worker at a time. While a timed-out worker is still
//! running, further requests for that seat get the fallback immediately, so a
//! hung agent holds one blocking thread rather than one per decision.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::agent::{Agent, AgentError};
use crate::moves::Move;
use crate::rules::LegalMoves;
use crate::snapshot::StateSnapshot;

/// How the move that reached the table was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    OnTime,
    TimedOut,
    /// `rejected` is `None` when the agent could not even build a move
    InvalidMoveSubstituted { rejected: Option<Move> },
    AgentFailed { reason: String },
}

impl DecisionOutcome {
    pub fn is_substituted(&self) -> bool {
        !matches!(self, DecisionOutcome::OnTime)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Always a member of the legal set the request was made with
    pub mv: Move,
    pub outcome: DecisionOutcome,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct DecisionGateway {
    time_limit: Duration,
    busy: Mutex<HashMap<usize, Arc<AtomicBool>>>,
}

/// Clears the seat's busy flag when the worker finishes, panicking or not.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DecisionGateway {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            busy: Mutex::new(HashMap::new()),
        }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// True while an earlier decision for `seat` is still running.
    pub fn in_flight(&self, seat: usize) -> bool {
        self.seat_flag(seat).load(Ordering::Acquire)
    }

    fn seat_flag(&self, seat: usize) -> Arc<AtomicBool> {
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(busy.entry(seat).or_default())
    }

    /// Asks `agent` for a move and enforces the deadline and the legal set.
    pub async fn decide(
        &self,
        agent: Arc<dyn Agent>,
        snapshot: StateSnapshot,
        legal: LegalMoves,
    ) -> Decision {
        let started = Instant::now();
        let seat = snapshot.seat;

        let flag = self.seat_flag(seat);
        if flag.swap(true, Ordering::AcqRel) {
            warn!(
                seat,
                agent = agent.name(),
                "previous decision still running, substituting fallback"
            );
            return Decision {
                mv: legal.fallback(),
                outcome: DecisionOutcome::TimedOut,
                elapsed: started.elapsed(),
            };
        }
        let guard = InFlight(flag);

        let worker_legal = legal.clone();
        let worker_agent = Arc::clone(&agent);
        let handle = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            worker_agent.decide(&snapshot, &worker_legal)
        });

        // dropping the handle on timeout detaches the worker; its answer is lost
        let (mv, outcome) = match tokio::time::timeout(self.time_limit, handle).await {
            Err(_) => {
                warn!(
                    seat,
                    agent = agent.name(),
                    limit_ms = self.time_limit.as_millis() as u64,
                    "decision timed out, substituting fallback"
                );
                (legal.fallback(), DecisionOutcome::TimedOut)
            }
            Ok(Err(join_err)) => {
                let reason = join_error_reason(join_err);
                warn!(seat, agent = agent.name(), %reason, "agent panicked, substituting fallback");
                (legal.fallback(), DecisionOutcome::AgentFailed { reason })
            }
            Ok(Ok(Err(AgentError::Construction(e)))) => {
                warn!(seat, agent = agent.name(), error = %e, "malformed move, substituting fallback");
                (
                    legal.fallback(),
                    DecisionOutcome::InvalidMoveSubstituted { rejected: None },
                )
            }
            Ok(Ok(Err(e))) => {
                warn!(seat, agent = agent.name(), error = %e, "agent failed, substituting fallback");
                (
                    legal.fallback(),
                    DecisionOutcome::AgentFailed {
                        reason: e.to_string(),
                    },
                )
            }
            Ok(Ok(Ok(mv))) if legal.contains(&mv) => (mv, DecisionOutcome::OnTime),
            Ok(Ok(Ok(mv))) => {
                warn!(seat, agent = agent.name(), rejected = %mv, "illegal move, substituting fallback");
                (
                    legal.fallback(),
                    DecisionOutcome::InvalidMoveSubstituted { rejected: Some(mv) },
                )
            }
        };

        let elapsed = started.elapsed();
        debug!(seat, mv = %mv, elapsed_ms = elapsed.as_millis() as u64, "decision made");
        Decision {
            mv,
            outcome,
            elapsed,
        }
    }
}

fn join_error_reason(err: JoinError) -> String {
    if err.is_cancelled() {
        return "decision task cancelled".to_string();
    }
    let payload = err.into_panic();
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "agent panicked".to_string()
    }
}
