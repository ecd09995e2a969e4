use thiserror::Error;

use crate::phase::HandPhase;

/// Errors that abort a hand or a game. Anything that originates inside a
/// single seat's decision is converted to a substituted move instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Deck exhausted while dealing")]
    EmptyDeck,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("It's not seat {actual}'s turn (expected seat {expected:?})")]
    NotSeatsTurn {
        expected: Option<usize>,
        actual: usize,
    },
    #[error("Unknown seat {0}")]
    UnknownSeat(usize),
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] RuleError),
    #[error("Operation not allowed in phase {0:?}")]
    WrongPhase(HandPhase),
    #[error("Table invariant violated: {0}")]
    InvariantViolation(String),
    #[error("Need at least two seats with chips, found {0}")]
    NotEnoughPlayers(usize),
    #[error("Failed to write hand log: {0}")]
    HandLog(String),
}

/// Construction error for [`crate::moves::Move`].
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MoveError {
    #[error("RAISE requires a positive amount, got {0:?}")]
    MissingRaiseAmount(Option<u32>),
}

/// Why a move is outside the legal set for the acting seat.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RuleError {
    #[error("Cannot fold when there is nothing to call")]
    FoldWithoutBet,
    #[error("Cannot check facing a bet of {to_call}")]
    CheckFacingBet { to_call: u32 },
    #[error("Nothing to call")]
    NothingToCall,
    #[error("Raise to {amount} does not exceed the target bet of {target}")]
    RaiseTooSmall { amount: u32, target: u32 },
    #[error("Seat has no chips left to raise with")]
    CannotRaise,
    #[error("Seat is not able to act")]
    SeatCannotAct,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid card: {0:?}")]
pub struct CardParseError(pub String);
