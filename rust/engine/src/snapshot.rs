use serde::{Deserialize, Serialize};

use crate::cards::{format_cards, Card};
use crate::logger::MoveRecord;
use crate::phase::HandPhase;
use crate::player::PlayerState;

/// Read-only view of the table handed to the seat whose turn it is.
///
/// It is an owned copy: an agent can keep it past its turn without holding
/// anything of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub seat: usize,
    pub state: PlayerState,
    pub hole: Option<[Card; 2]>,
    pub board: Vec<Card>,
    pub chips: u32,
    /// Chips this seat has put into the pot this hand
    pub at_stake: u32,
    pub to_call: u32,
    pub target_bet: u32,
    pub pot: u32,
    pub phase: HandPhase,
    pub history: Vec<MoveRecord>,
}

impl StateSnapshot {
    /// Compact single-line form: `state;hole;board;chips;at_stake||history`.
    pub fn encode(&self) -> String {
        let hole = self.hole.map(|h| format_cards(&h)).unwrap_or_default();
        let history: String = self.history.iter().map(MoveRecord::encode).collect();
        format!(
            "{};{};{};{};{}||{}",
            self.state.as_str(),
            hole,
            format_cards(&self.board),
            self.chips,
            self.at_stake,
            history
        )
    }
}
