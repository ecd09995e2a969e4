use serde::{Deserialize, Serialize};

use crate::errors::RuleError;
use crate::moves::{Move, MoveType};

/// The legal-move set for one seat at one point of a betting round.
///
/// Derived from the seat's stack, what it already put in this round and the
/// round's target bet. Agents receive it alongside their snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMoves {
    /// Chips still owed to match the target, before clamping to the stack
    pub to_call: u32,
    pub target_bet: u32,
    pub round_bet: u32,
    pub stack: u32,
    pub can_act: bool,
}

impl LegalMoves {
    pub fn new(stack: u32, round_bet: u32, target_bet: u32, can_act: bool) -> Self {
        Self {
            to_call: target_bet.saturating_sub(round_bet),
            target_bet,
            round_bet,
            stack,
            can_act,
        }
    }

    pub fn can_fold(&self) -> bool {
        self.can_act && self.to_call > 0
    }

    pub fn can_check(&self) -> bool {
        self.can_act && self.to_call == 0
    }

    pub fn can_call(&self) -> bool {
        self.can_act && self.to_call > 0
    }

    pub fn can_raise(&self) -> bool {
        self.can_act && self.stack > self.to_call
    }

    /// Smallest legal raise-to amount.
    pub fn min_raise(&self) -> Option<u32> {
        self.can_raise().then(|| self.target_bet + 1)
    }

    /// Raise-to amount that puts the whole stack in; larger requests clamp to it.
    pub fn max_raise(&self) -> Option<u32> {
        self.can_raise().then(|| self.round_bet + self.stack)
    }

    pub fn move_types(&self) -> Vec<MoveType> {
        let mut v = Vec::with_capacity(3);
        if self.can_fold() {
            v.push(MoveType::Fold);
        }
        if self.can_check() {
            v.push(MoveType::Check);
        }
        if self.can_call() {
            v.push(MoveType::Call);
        }
        if self.can_raise() {
            v.push(MoveType::Raise);
        }
        v
    }

    pub fn contains(&self, mv: &Move) -> bool {
        validate_move(self, *mv).is_ok()
    }

    /// Move substituted for a late or illegal decision: FOLD, or CHECK when
    /// there is nothing to call.
    pub fn fallback(&self) -> Move {
        if self.can_fold() {
            Move::FOLD
        } else {
            Move::CHECK
        }
    }
}

/// A legal move resolved to the chips it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedMove {
    Fold,
    Check,
    /// Chips paid, clamped to the stack
    Call(u32),
    /// New round contribution and the chips paid to reach it
    Raise { to: u32, pay: u32 },
}

/// Checks a move against the legal set and resolves its chip movement.
///
/// Requests that exceed the stack are clamped to an all-in rather than
/// rejected. A raise from a stack that cannot cover the call resolves to an
/// all-in call.
///
/// # Errors
///
/// Returns a [`RuleError`] when the move is outside the legal set: folding or
/// calling with nothing owed, checking while facing a bet, or raising to an
/// amount that does not exceed the target bet.
///
/// # Examples
///
/// ```
/// use tablejudge_engine::moves::Move;
/// use tablejudge_engine::rules::{validate_move, LegalMoves, ValidatedMove};
///
/// // 12 chips facing a target of 20: the call is clamped to an all-in
/// let legal = LegalMoves::new(12, 0, 20, true);
/// assert_eq!(validate_move(&legal, Move::CALL), Ok(ValidatedMove::Call(12)));
///
/// // raising to the target itself is not a raise
/// let legal = LegalMoves::new(500, 0, 20, true);
/// assert!(validate_move(&legal, Move::raise(20).unwrap()).is_err());
/// ```
pub fn validate_move(legal: &LegalMoves, mv: Move) -> Result<ValidatedMove, RuleError> {
    if !legal.can_act {
        return Err(RuleError::SeatCannotAct);
    }
    match mv.kind() {
        MoveType::Fold => {
            if legal.can_fold() {
                Ok(ValidatedMove::Fold)
            } else {
                Err(RuleError::FoldWithoutBet)
            }
        }
        MoveType::Check => {
            if legal.can_check() {
                Ok(ValidatedMove::Check)
            } else {
                Err(RuleError::CheckFacingBet {
                    to_call: legal.to_call,
                })
            }
        }
        MoveType::Call => {
            if legal.can_call() {
                Ok(ValidatedMove::Call(legal.to_call.min(legal.stack)))
            } else {
                Err(RuleError::NothingToCall)
            }
        }
        MoveType::Raise => {
            let amount = mv.amount().unwrap_or(0);
            if legal.stack == 0 {
                return Err(RuleError::CannotRaise);
            }
            if amount <= legal.target_bet {
                return Err(RuleError::RaiseTooSmall {
                    amount,
                    target: legal.target_bet,
                });
            }
            // a stack that cannot cover the call goes all-in without reopening
            if !legal.can_raise() {
                return Ok(ValidatedMove::Call(legal.stack));
            }
            let to = amount.min(legal.round_bet + legal.stack);
            Ok(ValidatedMove::Raise {
                to,
                pay: to - legal.round_bet,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_owed_allows_check_and_raise_only() {
        let legal = LegalMoves::new(100, 10, 10, true);
        assert_eq!(legal.move_types(), vec![MoveType::Check, MoveType::Raise]);
        assert_eq!(legal.fallback(), Move::CHECK);
        assert_eq!(
            validate_move(&legal, Move::FOLD),
            Err(RuleError::FoldWithoutBet)
        );
        assert_eq!(
            validate_move(&legal, Move::CALL),
            Err(RuleError::NothingToCall)
        );
    }

    #[test]
    fn facing_a_bet_allows_fold_call_raise() {
        let legal = LegalMoves::new(100, 5, 10, true);
        assert_eq!(legal.to_call, 5);
        assert_eq!(
            legal.move_types(),
            vec![MoveType::Fold, MoveType::Call, MoveType::Raise]
        );
        assert_eq!(legal.fallback(), Move::FOLD);
        assert_eq!(validate_move(&legal, Move::CALL), Ok(ValidatedMove::Call(5)));
        assert_eq!(
            validate_move(&legal, Move::CHECK),
            Err(RuleError::CheckFacingBet { to_call: 5 })
        );
    }

    #[test]
    fn raise_bounds() {
        let legal = LegalMoves::new(100, 5, 10, true);
        assert_eq!(legal.min_raise(), Some(11));
        assert_eq!(legal.max_raise(), Some(105));
        assert_eq!(
            validate_move(&legal, Move::raise(10).unwrap()),
            Err(RuleError::RaiseTooSmall {
                amount: 10,
                target: 10
            })
        );
        assert_eq!(
            validate_move(&legal, Move::raise(30).unwrap()),
            Ok(ValidatedMove::Raise { to: 30, pay: 25 })
        );
    }

    #[test]
    fn oversized_raise_is_clamped_to_stack() {
        let legal = LegalMoves::new(40, 10, 20, true);
        assert_eq!(
            validate_move(&legal, Move::raise(1_000).unwrap()),
            Ok(ValidatedMove::Raise { to: 50, pay: 40 })
        );
    }

    #[test]
    fn short_stack_raise_is_an_all_in_call() {
        let legal = LegalMoves::new(12, 0, 20, true);
        assert!(!legal.can_raise());
        assert!(legal.contains(&Move::raise(40).unwrap()));
        assert_eq!(
            validate_move(&legal, Move::raise(40).unwrap()),
            Ok(ValidatedMove::Call(12))
        );
        assert_eq!(validate_move(&legal, Move::CALL), Ok(ValidatedMove::Call(12)));
        assert_eq!(
            validate_move(&legal, Move::raise(20).unwrap()),
            Err(RuleError::RaiseTooSmall {
                amount: 20,
                target: 20
            })
        );
    }

    #[test]
    fn exact_call_stack_raise_is_an_all_in_call() {
        let legal = LegalMoves::new(15, 5, 20, true);
        assert_eq!(
            validate_move(&legal, Move::raise(100).unwrap()),
            Ok(ValidatedMove::Call(15))
        );
    }

    #[test]
    fn inactive_seat_has_no_moves() {
        let legal = LegalMoves::new(0, 20, 20, false);
        assert!(legal.move_types().is_empty());
        assert_eq!(
            validate_move(&legal, Move::CHECK),
            Err(RuleError::SeatCannotAct)
        );
    }
}
