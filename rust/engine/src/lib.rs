//! # tablejudge-engine: Texas Hold'em Table and Tournament Core
//!
//! A deterministic no-limit Texas Hold'em table for 2 to 10 seats, driven by
//! pluggable agents that must answer within a time limit. Provides the
//! betting-round state machine, hand evaluation, the time-bounded decision
//! gateway and the hand/game/tournament loops.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hand evaluation and strength comparison
//! - [`moves`] - The four move types and their construction rules
//! - [`rules`] - Legal-move sets and move validation
//! - [`phase`] - Hand phases and their card reveals
//! - [`player`] - Seat state, blinds and stack bookkeeping
//! - [`table`] - The hand and betting-round state machine
//! - [`snapshot`] - The read-only view handed to agents
//! - [`agent`] - The agent capability trait
//! - [`gateway`] - Time-bounded decision requests
//! - [`judge`] - Hand, game and tournament loops
//! - [`game`] - Game summaries and tournament standings
//! - [`logger`] - Hand history and JSONL hand records
//! - [`errors`] - Error types for table operations
//!
//! ## Quick Start
//!
//! ```rust
//! use tablejudge_engine::rules::LegalMoves;
//! use tablejudge_engine::moves::Move;
//! use tablejudge_engine::table::{Blinds, Table};
//!
//! // Heads-up, 500 chips each, blinds 5/10
//! let mut table = Table::new(2, 500, Blinds::from_big(10), 42);
//!
//! // Every seat just calls or checks
//! let outcome = table
//!     .play_hand_with(|_, legal: &LegalMoves| {
//!         if legal.can_call() { Move::CALL } else { Move::CHECK }
//!     })
//!     .expect("hand should settle");
//!
//! assert_eq!(outcome.board.len(), 5);
//! assert_eq!(table.total_chips(), 1000);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Deals are reproducible from the table seed:
//!
//! ```rust
//! use tablejudge_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(7);
//! let mut b = Deck::new_with_seed(7);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.draw_n(5).unwrap(), b.draw_n(5).unwrap());
//! ```

pub mod agent;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod gateway;
pub mod hand;
pub mod judge;
pub mod logger;
pub mod moves;
pub mod phase;
pub mod player;
pub mod rules;
pub mod snapshot;
pub mod table;
