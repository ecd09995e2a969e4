use serde::{Deserialize, Serialize};

/// Phases of a single hand, cycling back to `Prehand` after `Settle`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum HandPhase {
    /// Between hands: shuffle and deal
    Prehand,
    Preflop,
    Flop,
    Turn,
    River,
    /// Showdown and payout
    Settle,
}

impl HandPhase {
    pub fn next(self) -> HandPhase {
        match self {
            HandPhase::Prehand => HandPhase::Preflop,
            HandPhase::Preflop => HandPhase::Flop,
            HandPhase::Flop => HandPhase::Turn,
            HandPhase::Turn => HandPhase::River,
            HandPhase::River => HandPhase::Settle,
            HandPhase::Settle => HandPhase::Prehand,
        }
    }

    /// Community cards revealed when the phase is entered.
    pub fn new_cards(self) -> usize {
        match self {
            HandPhase::Flop => 3,
            HandPhase::Turn | HandPhase::River => 1,
            HandPhase::Prehand | HandPhase::Preflop | HandPhase::Settle => 0,
        }
    }

    /// Phases that hold a betting round.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            HandPhase::Preflop | HandPhase::Flop | HandPhase::Turn | HandPhase::River
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_to_prehand() {
        assert_eq!(HandPhase::Settle.next(), HandPhase::Prehand);
        assert_eq!(HandPhase::Preflop.next(), HandPhase::Flop);
        let mut p = HandPhase::Prehand;
        for _ in 0..6 {
            p = p.next();
        }
        assert_eq!(p, HandPhase::Prehand);
    }

    #[test]
    fn reveal_counts_sum_to_board_size() {
        let counts: Vec<usize> = [
            HandPhase::Prehand,
            HandPhase::Preflop,
            HandPhase::Flop,
            HandPhase::Turn,
            HandPhase::River,
            HandPhase::Settle,
        ]
        .iter()
        .map(|p| p.new_cards())
        .collect();
        assert_eq!(counts, vec![0, 0, 3, 1, 1, 0]);
        assert_eq!(counts.iter().sum::<usize>(), 5);
    }

    #[test]
    fn phases_are_ordered_within_a_cycle() {
        assert!(HandPhase::Prehand < HandPhase::Preflop);
        assert!(HandPhase::River < HandPhase::Settle);
    }
}
