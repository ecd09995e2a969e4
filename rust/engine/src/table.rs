//! The hand and betting-round state machine.
//!
//! A [`Table`] owns the deck, the board, the pot and every seat. It is driven
//! one step at a time:
//!
//! 1. [`Table::start_hand`] shuffles, deals, posts blinds and opens PREFLOP.
//! 2. [`Table::next_actor`] names the seat that must act, or `None` once the
//!    round is closed; [`Table::apply_move`] applies that seat's move.
//! 3. [`Table::end_round`] advances to the next phase (or straight to SETTLE
//!    when the hand is decided or everyone left is all-in).
//! 4. [`Table::settle`] pays the pot and rotates the blinds.
//!
//! Chips are conserved throughout: the sum of all stacks plus the pot equals
//! the total at hand start until the payout, and every mutation re-checks it.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::hand::{best_seats, rank, HandStrength};
use crate::logger::{HandHistory, MoveRecord};
use crate::moves::Move;
use crate::phase::HandPhase;
use crate::player::{BlindRole, PlayerState, Seat};
use crate::rules::{validate_move, LegalMoves, ValidatedMove};
use crate::snapshot::StateSnapshot;

/// Forced bet sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Blinds {
    pub small: u32,
    pub big: u32,
}

impl Blinds {
    /// Small blind is half the big blind, rounded down.
    pub fn from_big(big: u32) -> Self {
        Self {
            small: big / 2,
            big,
        }
    }
}

/// Result of a settled hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandOutcome {
    /// 1-based count of hands settled at this table since the last reset
    pub hand_number: u64,
    pub pot: u32,
    pub winners: Vec<usize>,
    /// (seat, chips won)
    pub payouts: Vec<(usize, u32)>,
    /// False when every other seat folded
    pub showdown: bool,
    pub strengths: Vec<(usize, HandStrength)>,
    pub board: Vec<Card>,
    pub chips: Vec<u32>,
    pub history: HandHistory,
}

#[derive(Debug)]
pub struct Table {
    seats: Vec<Seat>,
    deck: Deck,
    seed: u64,
    blinds: Blinds,
    board: Vec<Card>,
    pot: u32,
    target_bet: u32,
    phase: HandPhase,
    small_blind_seat: usize,
    big_blind_seat: usize,
    queue: VecDeque<usize>,
    acting: Option<usize>,
    history: HandHistory,
    chips_at_start: u64,
    hands_played: u64,
}

impl Table {
    pub fn new(seat_count: usize, buy_in: u32, blinds: Blinds, seed: u64) -> Self {
        Self::with_stacks(vec![buy_in; seat_count], blinds, seed)
    }

    /// A table whose seat `i` starts with `stacks[i]` chips.
    pub fn with_stacks(stacks: Vec<u32>, blinds: Blinds, seed: u64) -> Self {
        let seat_count = stacks.len();
        Self {
            seats: stacks
                .into_iter()
                .enumerate()
                .map(|(id, chips)| Seat::new(id, chips))
                .collect(),
            deck: Deck::new_with_seed(seed),
            seed,
            blinds,
            board: Vec::with_capacity(5),
            pot: 0,
            target_bet: 0,
            phase: HandPhase::Prehand,
            small_blind_seat: 0,
            big_blind_seat: 1 % seat_count.max(1),
            queue: VecDeque::new(),
            acting: None,
            history: HandHistory::new(),
            chips_at_start: 0,
            hands_played: 0,
        }
    }

    /// Restores every stack to `buy_in` and clears all per-hand state; the
    /// small blind goes back to seat 0. The deck keeps its RNG stream.
    pub fn reset(&mut self, buy_in: u32) {
        for s in &mut self.seats {
            s.set_chips(buy_in);
            s.reset_hand();
        }
        self.board.clear();
        self.pot = 0;
        self.target_bet = 0;
        self.phase = HandPhase::Prehand;
        self.small_blind_seat = 0;
        self.big_blind_seat = 1 % self.seats.len().max(1);
        self.queue.clear();
        self.acting = None;
        self.history = HandHistory::new();
        self.hands_played = 0;
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn seat(&self, id: usize) -> Result<&Seat, EngineError> {
        self.seats.get(id).ok_or(EngineError::UnknownSeat(id))
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn target_bet(&self) -> u32 {
        self.target_bet
    }
    pub fn phase(&self) -> HandPhase {
        self.phase
    }
    pub fn small_blind_seat(&self) -> usize {
        self.small_blind_seat
    }
    pub fn big_blind_seat(&self) -> usize {
        self.big_blind_seat
    }
    pub fn history(&self) -> &HandHistory {
        &self.history
    }
    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }
    pub fn chips(&self) -> Vec<u32> {
        self.seats.iter().map(Seat::chips).collect()
    }

    /// Stacks plus pot.
    pub fn total_chips(&self) -> u64 {
        self.seats.iter().map(|s| s.chips() as u64).sum::<u64>() + self.pot as u64
    }

    pub fn seats_with_chips(&self) -> usize {
        self.seats.iter().filter(|s| s.chips() > 0).count()
    }

    /// PREHAND: fresh deck, hole cards for every seat with chips, blinds
    /// posted, then the PREFLOP round is opened.
    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        if self.phase != HandPhase::Prehand {
            return Err(EngineError::WrongPhase(self.phase));
        }
        for s in &mut self.seats {
            s.reset_hand();
        }
        self.board.clear();
        self.pot = 0;
        self.target_bet = 0;
        self.queue.clear();
        self.acting = None;
        self.history = HandHistory::new();

        let dealt = self.seats_with_chips();
        if dealt < 2 {
            return Err(EngineError::NotEnoughPlayers(dealt));
        }
        self.chips_at_start = self.total_chips();

        let sb = self
            .first_from(self.small_blind_seat, |s| s.state() != PlayerState::Skip)
            .ok_or(EngineError::NotEnoughPlayers(dealt))?;
        let bb = self
            .first_from(sb + 1, |s| s.state() != PlayerState::Skip)
            .ok_or(EngineError::NotEnoughPlayers(dealt))?;
        self.small_blind_seat = sb;
        self.big_blind_seat = bb;

        self.deck.shuffle();
        for i in self.order_from(sb) {
            if self.seats[i].state() == PlayerState::Skip {
                continue;
            }
            let hole = [self.deck.draw()?, self.deck.draw()?];
            self.seats[i].set_hole(Some(hole));
        }

        self.seats[sb].set_blind(BlindRole::Small);
        self.seats[bb].set_blind(BlindRole::Big);
        self.pot += self.seats[sb].pay(self.blinds.small);
        self.pot += self.seats[bb].pay(self.blinds.big);
        self.target_bet = self.seats[sb].round_bet().max(self.seats[bb].round_bet());

        debug!(
            hand = self.hands_played + 1,
            small_blind = sb,
            big_blind = bb,
            pot = self.pot,
            "hand started"
        );

        self.phase = HandPhase::Preflop;
        self.begin_round()?;
        self.check_conservation()
    }

    /// Seat that must act now, or `None` when the current round is closed.
    pub fn next_actor(&mut self) -> Option<usize> {
        if !self.phase.is_betting() {
            return None;
        }
        if self.acting.is_some() {
            return self.acting;
        }
        if self.round_over() {
            self.queue.clear();
            return None;
        }
        while let Some(seat) = self.queue.pop_front() {
            if self.seats[seat].state() == PlayerState::ToCall {
                self.acting = Some(seat);
                return Some(seat);
            }
        }
        None
    }

    /// True when nobody can or needs to act any more this round.
    pub fn round_over(&self) -> bool {
        let in_pot = self.seats.iter().filter(|s| s.state().in_pot()).count();
        if in_pot <= 1 {
            return true;
        }
        let active: Vec<&Seat> = self
            .seats
            .iter()
            .filter(|s| s.state().is_active())
            .collect();
        if !active.iter().any(|s| s.state() == PlayerState::ToCall) {
            return true;
        }
        // a lone voluntary seat facing only all-ins has nobody to bet against
        active.len() == 1 && active[0].round_bet() >= self.target_bet
    }

    pub fn legal_moves(&self, seat: usize) -> Result<LegalMoves, EngineError> {
        let s = self.seat(seat)?;
        Ok(LegalMoves::new(
            s.chips(),
            s.round_bet(),
            self.target_bet,
            self.phase.is_betting() && s.state().is_active(),
        ))
    }

    pub fn snapshot(&self, seat: usize) -> Result<StateSnapshot, EngineError> {
        let s = self.seat(seat)?;
        Ok(StateSnapshot {
            seat,
            state: s.state(),
            hole: s.hole_cards(),
            board: self.board.clone(),
            chips: s.chips(),
            at_stake: s.at_stake(),
            to_call: self.target_bet.saturating_sub(s.round_bet()),
            target_bet: self.target_bet,
            pot: self.pot,
            phase: self.phase,
            history: self.history.moves().to_vec(),
        })
    }

    /// Applies the acting seat's move. An illegal move leaves the turn open
    /// so the caller can apply a substitute.
    pub fn apply_move(&mut self, seat: usize, mv: Move) -> Result<ValidatedMove, EngineError> {
        if self.acting != Some(seat) {
            return Err(EngineError::NotSeatsTurn {
                expected: self.acting,
                actual: seat,
            });
        }
        let legal = self.legal_moves(seat)?;
        let validated = validate_move(&legal, mv)?;

        let mut reopened = false;
        let recorded = match validated {
            ValidatedMove::Fold => {
                self.seats[seat].set_state(PlayerState::Out);
                Move::FOLD
            }
            ValidatedMove::Check => {
                self.seats[seat].set_state(PlayerState::In);
                Move::CHECK
            }
            ValidatedMove::Call(pay) => {
                let s = &mut self.seats[seat];
                self.pot += s.pay(pay);
                if s.state() != PlayerState::AllIn {
                    s.set_state(PlayerState::In);
                }
                Move::CALL
            }
            ValidatedMove::Raise { to, pay } => {
                let s = &mut self.seats[seat];
                self.pot += s.pay(pay);
                if s.state() != PlayerState::AllIn {
                    s.set_state(PlayerState::In);
                }
                if s.round_bet() > self.target_bet {
                    self.target_bet = s.round_bet();
                    reopened = true;
                }
                Move::raise(to).map_err(|e| EngineError::InvariantViolation(e.to_string()))?
            }
        };
        if reopened {
            self.reopen(seat);
        }

        self.history.push(MoveRecord {
            seat,
            phase: self.phase,
            mv: recorded,
        });
        self.acting = None;
        debug!(seat, mv = %recorded, pot = self.pot, target = self.target_bet, "move applied");
        self.check_conservation()?;
        Ok(validated)
    }

    /// Closes the current betting round and enters the next phase. Goes
    /// straight to SETTLE when one seat is left, and runs out the board
    /// without betting when nobody else can act.
    pub fn end_round(&mut self) -> Result<HandPhase, EngineError> {
        if !self.phase.is_betting() {
            return Err(EngineError::WrongPhase(self.phase));
        }
        if self.acting.is_some() || !self.round_over() {
            return Err(EngineError::InvariantViolation(
                "betting round still open".to_string(),
            ));
        }

        let in_pot = self.seats.iter().filter(|s| s.state().in_pot()).count();
        if in_pot <= 1 {
            self.phase = HandPhase::Settle;
            return Ok(self.phase);
        }

        let active = self.seats.iter().filter(|s| s.state().is_active()).count();
        if active <= 1 {
            let missing = 5 - self.board.len();
            self.reveal(missing)?;
            self.phase = HandPhase::Settle;
            return Ok(self.phase);
        }

        self.phase = self.phase.next();
        if self.phase.is_betting() {
            self.begin_round()?;
        }
        Ok(self.phase)
    }

    /// Pays the pot to the best hand(s), resets per-hand state and rotates the
    /// small blind to the next seat with chips.
    pub fn settle(&mut self) -> Result<HandOutcome, EngineError> {
        if self.phase != HandPhase::Settle {
            return Err(EngineError::WrongPhase(self.phase));
        }
        let contenders: Vec<usize> = (0..self.seats.len())
            .filter(|&i| self.seats[i].state().in_pot())
            .collect();

        let (winners, strengths, showdown) = match contenders.as_slice() {
            [] => {
                return Err(EngineError::InvariantViolation(
                    "no seat left to award the pot to".to_string(),
                ))
            }
            [only] => (vec![*only], Vec::new(), false),
            _ => {
                let mut strengths = Vec::with_capacity(contenders.len());
                for &i in &contenders {
                    let hole = self.seats[i].hole_cards().ok_or_else(|| {
                        EngineError::InvariantViolation(format!("seat {} has no hole cards", i))
                    })?;
                    strengths.push((i, rank(&hole, &self.board)));
                }
                (best_seats(&strengths), strengths, true)
            }
        };

        let pot = self.pot;
        let payouts = split_pot(pot, &winners);
        for &(seat, amount) in &payouts {
            self.seats[seat].add_chips(amount);
        }
        self.pot = 0;
        self.check_conservation()?;

        let chips = self.chips();
        self.history.close(&self.board, pot, &chips);
        self.hands_played += 1;
        let outcome = HandOutcome {
            hand_number: self.hands_played,
            pot,
            winners,
            payouts,
            showdown,
            strengths,
            board: std::mem::take(&mut self.board),
            chips,
            history: std::mem::take(&mut self.history),
        };

        for s in &mut self.seats {
            s.reset_hand();
        }
        self.target_bet = 0;
        self.queue.clear();
        self.acting = None;
        if let Some(next) = self.first_from(self.small_blind_seat + 1, |s| s.chips() > 0) {
            self.small_blind_seat = next;
        }
        self.phase = HandPhase::Prehand;

        debug!(hand = outcome.hand_number, pot, winners = ?outcome.winners, "hand settled");
        Ok(outcome)
    }

    /// Plays one whole hand synchronously, asking `decide` for every move.
    /// Illegal answers are replaced by the seat's fallback move.
    pub fn play_hand_with<F>(&mut self, mut decide: F) -> Result<HandOutcome, EngineError>
    where
        F: FnMut(&StateSnapshot, &LegalMoves) -> Move,
    {
        self.start_hand()?;
        loop {
            while let Some(seat) = self.next_actor() {
                let snapshot = self.snapshot(seat)?;
                let legal = self.legal_moves(seat)?;
                let mv = decide(&snapshot, &legal);
                match self.apply_move(seat, mv) {
                    Err(EngineError::IllegalMove(_)) => {
                        self.apply_move(seat, legal.fallback())?;
                    }
                    other => {
                        other?;
                    }
                }
            }
            if self.end_round()? == HandPhase::Settle {
                break;
            }
        }
        self.settle()
    }

    fn begin_round(&mut self) -> Result<(), EngineError> {
        self.reveal(self.phase.new_cards())?;
        if self.phase != HandPhase::Preflop {
            self.target_bet = 0;
            for s in &mut self.seats {
                s.reset_round();
                if s.state() == PlayerState::In {
                    s.set_state(PlayerState::ToCall);
                }
            }
        }
        let first = if self.phase == HandPhase::Preflop {
            self.big_blind_seat + 1
        } else {
            self.small_blind_seat
        };
        self.queue = self
            .order_from(first)
            .filter(|&i| self.seats[i].state().is_active())
            .collect();
        self.acting = None;
        Ok(())
    }

    fn reveal(&mut self, n: usize) -> Result<(), EngineError> {
        if self.board.len() + n > 5 {
            return Err(EngineError::InvariantViolation(format!(
                "board would hold {} cards",
                self.board.len() + n
            )));
        }
        for _ in 0..n {
            let c = self.deck.draw()?;
            self.board.push(c);
        }
        Ok(())
    }

    /// Every other IN seat must act again; the queue restarts after the raiser.
    fn reopen(&mut self, raiser: usize) {
        for (i, s) in self.seats.iter_mut().enumerate() {
            if i != raiser && s.state() == PlayerState::In {
                s.set_state(PlayerState::ToCall);
            }
        }
        self.queue = self
            .order_from(raiser + 1)
            .filter(|&i| i != raiser && self.seats[i].state() == PlayerState::ToCall)
            .collect();
    }

    /// Seat indices in table order starting at `start`, wrapping once.
    fn order_from(&self, start: usize) -> impl Iterator<Item = usize> {
        let n = self.seats.len();
        (0..n).map(move |i| (start + i) % n)
    }

    fn first_from(&self, start: usize, pred: impl Fn(&Seat) -> bool) -> Option<usize> {
        self.order_from(start).find(|&i| pred(&self.seats[i]))
    }

    fn check_conservation(&self) -> Result<(), EngineError> {
        let total = self.total_chips();
        if total != self.chips_at_start {
            return Err(EngineError::InvariantViolation(format!(
                "chips not conserved: {} at hand start, {} now",
                self.chips_at_start, total
            )));
        }
        Ok(())
    }
}

/// Splits `pot` evenly between `winners`; leftover chips go one each to the
/// lowest seat ids.
pub fn split_pot(pot: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let mut sorted = winners.to_vec();
    sorted.sort_unstable();
    let n = sorted.len() as u32;
    let share = pot / n;
    let remainder = (pot % n) as usize;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, seat)| (seat, share + u32::from(i < remainder)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heads_up() -> Table {
        Table::new(2, 500, Blinds { small: 5, big: 10 }, 42)
    }

    #[test]
    fn blinds_are_posted_and_preflop_opens() {
        let mut t = heads_up();
        t.start_hand().unwrap();
        assert_eq!(t.phase(), HandPhase::Preflop);
        assert_eq!(t.seats()[0].blind(), BlindRole::Small);
        assert_eq!(t.seats()[1].blind(), BlindRole::Big);
        assert_eq!(t.chips(), vec![495, 490]);
        assert_eq!(t.pot(), 15);
        assert_eq!(t.target_bet(), 10);
        assert!(t.seats().iter().all(|s| s.state() == PlayerState::ToCall));
        assert!(t.seats().iter().all(|s| s.hole_cards().is_some()));
        assert!(t.board().is_empty());
    }

    #[test]
    fn acting_out_of_turn_is_rejected() {
        let mut t = heads_up();
        t.start_hand().unwrap();
        assert_eq!(t.next_actor(), Some(0));
        assert_eq!(
            t.apply_move(1, Move::CALL),
            Err(EngineError::NotSeatsTurn {
                expected: Some(0),
                actual: 1
            })
        );
    }

    #[test]
    fn illegal_move_keeps_the_turn() {
        let mut t = heads_up();
        t.start_hand().unwrap();
        assert_eq!(t.next_actor(), Some(0));
        assert!(matches!(
            t.apply_move(0, Move::CHECK),
            Err(EngineError::IllegalMove(_))
        ));
        assert_eq!(t.next_actor(), Some(0));
        assert!(t.apply_move(0, Move::CALL).is_ok());
    }

    #[test]
    fn fold_ends_hand_without_more_cards() {
        let mut t = heads_up();
        t.start_hand().unwrap();
        let seat = t.next_actor().unwrap();
        t.apply_move(seat, Move::FOLD).unwrap();
        assert_eq!(t.next_actor(), None);
        assert_eq!(t.end_round().unwrap(), HandPhase::Settle);
        let outcome = t.settle().unwrap();
        assert_eq!(outcome.winners, vec![1]);
        assert!(!outcome.showdown);
        assert!(outcome.board.is_empty());
        assert_eq!(t.chips(), vec![495, 505]);
        assert_eq!(t.phase(), HandPhase::Prehand);
    }

    #[test]
    fn blinds_rotate_after_each_hand() {
        let mut t = Table::new(3, 100, Blinds::from_big(10), 1);
        t.start_hand().unwrap();
        assert_eq!((t.small_blind_seat(), t.big_blind_seat()), (0, 1));
        let mut guard = 0;
        while let Some(seat) = t.next_actor() {
            let fallback = t.legal_moves(seat).unwrap().fallback();
            t.apply_move(seat, fallback).unwrap();
            guard += 1;
            assert!(guard < 10);
        }
        assert_eq!(t.end_round().unwrap(), HandPhase::Settle);
        t.settle().unwrap();
        t.start_hand().unwrap();
        assert_eq!((t.small_blind_seat(), t.big_blind_seat()), (1, 2));
    }

    #[test]
    fn split_pot_gives_remainder_to_lowest_seats() {
        assert_eq!(split_pot(20, &[1]), vec![(1, 20)]);
        assert_eq!(split_pot(20, &[0, 1]), vec![(0, 10), (1, 10)]);
        assert_eq!(split_pot(11, &[3, 1, 2]), vec![(1, 4), (2, 4), (3, 3)]);
        assert!(split_pot(5, &[]).is_empty());
    }

    #[test]
    fn start_hand_needs_two_funded_seats() {
        let mut t = Table::new(2, 0, Blinds::from_big(10), 1);
        assert_eq!(t.start_hand(), Err(EngineError::NotEnoughPlayers(0)));
    }

    #[test]
    fn start_hand_twice_is_rejected() {
        let mut t = heads_up();
        t.start_hand().unwrap();
        assert_eq!(
            t.start_hand(),
            Err(EngineError::WrongPhase(HandPhase::Preflop))
        );
    }
}
