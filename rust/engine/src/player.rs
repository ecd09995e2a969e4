use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Per-hand status of a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerState {
    /// Folded for the rest of the hand
    Out,
    /// Must act before the round can close
    ToCall,
    /// Has matched the current target bet
    In,
    /// No chips left; stays eligible for the showdown
    AllIn,
    /// Not dealt into this hand
    Skip,
}

impl PlayerState {
    /// Able to take a voluntary action this round.
    pub fn is_active(self) -> bool {
        matches!(self, PlayerState::ToCall | PlayerState::In)
    }

    /// Still holds a claim on the pot.
    pub fn in_pot(self) -> bool {
        !matches!(self, PlayerState::Out | PlayerState::Skip)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerState::Out => "OUT",
            PlayerState::ToCall => "TO_CALL",
            PlayerState::In => "IN",
            PlayerState::AllIn => "ALL_IN",
            PlayerState::Skip => "SKIP",
        }
    }
}

/// Forced-bet role, recomputed every hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum BlindRole {
    #[default]
    None,
    Small,
    Big,
}

/// A table position and everything the table tracks for it.
#[derive(Debug, Clone)]
pub struct Seat {
    id: usize,
    chips: u32,
    state: PlayerState,
    blind: BlindRole,
    hole: Option<[Card; 2]>,
    /// Contribution to the current betting round
    round_bet: u32,
    /// Contribution to the pot this hand
    at_stake: u32,
}

impl Seat {
    pub fn new(id: usize, chips: u32) -> Self {
        Self {
            id,
            chips,
            state: PlayerState::ToCall,
            blind: BlindRole::None,
            hole: None,
            round_bet: 0,
            at_stake: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn state(&self) -> PlayerState {
        self.state
    }
    pub fn blind(&self) -> BlindRole {
        self.blind
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn round_bet(&self) -> u32 {
        self.round_bet
    }
    pub fn at_stake(&self) -> u32 {
        self.at_stake
    }

    pub(crate) fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }
    pub(crate) fn set_blind(&mut self, blind: BlindRole) {
        self.blind = blind;
    }
    pub(crate) fn set_hole(&mut self, hole: Option<[Card; 2]>) {
        self.hole = hole;
    }
    pub(crate) fn set_chips(&mut self, chips: u32) {
        self.chips = chips;
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Moves up to `amount` from the stack into this round's contribution and
    /// returns what was actually paid. Requests beyond the stack are clamped,
    /// and a seat left with nothing becomes ALL_IN.
    pub(crate) fn pay(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.round_bet += paid;
        self.at_stake += paid;
        if self.chips == 0 && self.state.in_pot() {
            self.state = PlayerState::AllIn;
        }
        paid
    }

    pub(crate) fn reset_round(&mut self) {
        self.round_bet = 0;
    }

    pub(crate) fn reset_hand(&mut self) {
        self.round_bet = 0;
        self.at_stake = 0;
        self.hole = None;
        self.blind = BlindRole::None;
        self.state = if self.chips == 0 {
            PlayerState::Skip
        } else {
            PlayerState::ToCall
        };
    }
}
