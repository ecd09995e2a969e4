//! # tablejudge-ai: Agents for the Table Judge
//!
//! Implementations of the engine's [`Agent`] trait and a factory that builds
//! them from short names, as used on the command line.
//!
//! ## Core Components
//!
//! - [`call::CallAgent`] - calls or checks, never folds or raises
//! - [`random::RandomAgent`] - uniform over the legal move types
//! - [`baseline::BaselineAgent`] - rule-based hand-strength heuristic
//! - [`faulty`] - deliberately slow or rule-breaking agents
//! - [`create_agent`] - factory for agents by name
//!
//! ## Quick Start
//!
//! ```rust
//! use tablejudge_ai::create_agent;
//!
//! let agent = create_agent("baseline", 42).unwrap();
//! assert_eq!(agent.name(), "baseline");
//! ```
//!
//! ## Agent Names
//!
//! - `"call"` - [`call::CallAgent`]
//! - `"random"` / `"random-nofold"` - [`random::RandomAgent`]
//! - `"baseline"` - [`baseline::BaselineAgent`]
//! - `"illegal"` - [`faulty::IllegalMoveAgent`]
//! - `"slow:<ms>[:<name>]"` - [`faulty::DelayedAgent`] around `<name>`
//!   (default `call`)

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

pub use tablejudge_engine::agent::{Agent, AgentError};

pub mod baseline;
pub mod call;
pub mod faulty;
pub mod random;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentSpecError {
    #[error("Unknown agent type: {0}")]
    Unknown(String),
    #[error("Invalid delay in agent spec {0:?}")]
    InvalidDelay(String),
}

/// Builds an agent from its name. `seed` feeds agents that use randomness.
///
/// # Example
///
/// ```rust
/// use tablejudge_ai::{create_agent, AgentSpecError};
///
/// assert_eq!(create_agent("slow:250", 0).unwrap().name(), "slow:250:call");
/// assert!(matches!(create_agent("oracle", 0), Err(AgentSpecError::Unknown(_))));
/// ```
pub fn create_agent(spec: &str, seed: u64) -> Result<Arc<dyn Agent>, AgentSpecError> {
    let spec = spec.trim();
    if let Some(rest) = spec.strip_prefix("slow:") {
        let (ms, inner) = rest.split_once(':').unwrap_or((rest, "call"));
        let ms: u64 = ms
            .parse()
            .map_err(|_| AgentSpecError::InvalidDelay(spec.to_string()))?;
        let inner = create_agent(inner, seed)?;
        return Ok(Arc::new(faulty::DelayedAgent::new(
            inner,
            Duration::from_millis(ms),
        )));
    }
    match spec {
        "call" => Ok(Arc::new(call::CallAgent)),
        "random" => Ok(Arc::new(random::RandomAgent::new(seed))),
        "random-nofold" => Ok(Arc::new(random::RandomAgent::new(seed).without_fold())),
        "baseline" => Ok(Arc::new(baseline::BaselineAgent::new())),
        "illegal" => Ok(Arc::new(faulty::IllegalMoveAgent)),
        other => Err(AgentSpecError::Unknown(other.to_string())),
    }
}

/// Names accepted by [`create_agent`], without the `slow:` wrapper.
pub const AGENT_NAMES: [&str; 5] = ["call", "random", "random-nofold", "baseline", "illegal"];
