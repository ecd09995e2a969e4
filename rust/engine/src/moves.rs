use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::MoveError;

/// The kind of decision a seat makes on its turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveType {
    Fold,
    Check,
    Call,
    Raise,
}

impl MoveType {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveType::Fold => "FOLD",
            MoveType::Check => "CHECK",
            MoveType::Call => "CALL",
            MoveType::Raise => "RAISE",
        }
    }
}

/// An immutable player decision.
///
/// A RAISE always carries a positive amount: the seat's total contribution
/// for the current betting round after the raise ("raise to").
///
/// ```
/// use tablejudge_engine::moves::{Move, MoveType};
///
/// let raise = Move::raise(40).unwrap();
/// assert_eq!(raise.kind(), MoveType::Raise);
/// assert_eq!(raise.amount(), Some(40));
/// assert!(Move::new(MoveType::Raise, None).is_err());
/// assert!(Move::raise(0).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Move {
    kind: MoveType,
    amount: Option<u32>,
}

impl Move {
    pub const FOLD: Move = Move {
        kind: MoveType::Fold,
        amount: None,
    };
    pub const CHECK: Move = Move {
        kind: MoveType::Check,
        amount: None,
    };
    pub const CALL: Move = Move {
        kind: MoveType::Call,
        amount: None,
    };

    /// Builds a move; the amount is required for RAISE and ignored otherwise.
    pub fn new(kind: MoveType, amount: Option<u32>) -> Result<Self, MoveError> {
        match kind {
            MoveType::Raise => match amount {
                Some(a) if a > 0 => Ok(Self {
                    kind,
                    amount: Some(a),
                }),
                other => Err(MoveError::MissingRaiseAmount(other)),
            },
            _ => Ok(Self { kind, amount: None }),
        }
    }

    pub fn raise(amount: u32) -> Result<Self, MoveError> {
        Self::new(MoveType::Raise, Some(amount))
    }

    pub fn kind(&self) -> MoveType {
        self.kind
    }

    pub fn amount(&self) -> Option<u32> {
        self.amount
    }
}

/// `TYPE:amount` with an empty amount for non-raises, as used in hand histories.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(a) => write!(f, "{}:{}", self.kind.as_str(), a),
            None => write!(f, "{}:", self.kind.as_str()),
        }
    }
}

#[derive(Deserialize)]
struct MoveRepr {
    kind: MoveType,
    amount: Option<u32>,
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = MoveRepr::deserialize(deserializer)?;
        Move::new(repr.kind, repr.amount).map_err(serde::de::Error::custom)
    }
}
