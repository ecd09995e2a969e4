use serde::Serialize;

use crate::gateway::DecisionOutcome;

/// Per-seat tally of how decisions reached the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecisionStats {
    pub decisions: u64,
    pub timeouts: u64,
    pub invalid: u64,
    pub failures: u64,
}

impl DecisionStats {
    pub fn record(&mut self, outcome: &DecisionOutcome) {
        self.decisions += 1;
        match outcome {
            DecisionOutcome::OnTime => {}
            DecisionOutcome::TimedOut => self.timeouts += 1,
            DecisionOutcome::InvalidMoveSubstituted { .. } => self.invalid += 1,
            DecisionOutcome::AgentFailed { .. } => self.failures += 1,
        }
    }

    pub fn substituted(&self) -> u64 {
        self.timeouts + self.invalid + self.failures
    }
}

/// Result of one game (stacks reset to the buy-in, played to a single
/// survivor or the hand limit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// 1-based
    pub game: u32,
    pub hands_played: u32,
    pub chips: Vec<u32>,
    pub winner: usize,
    /// The hand limit ended the game while several seats still had chips
    pub truncated: bool,
}

/// Seat holding the most chips; ties go to the lowest seat id.
pub fn chip_leader(chips: &[u32]) -> usize {
    chips
        .iter()
        .enumerate()
        .fold((0, 0), |(best, most), (seat, &c)| {
            if c > most {
                (seat, c)
            } else {
                (best, most)
            }
        })
        .0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatStanding {
    pub seat: usize,
    pub agent: String,
    pub wins: u32,
    /// Sum of final stacks over all games
    pub chips: u64,
    /// Sum of post-hand stacks over all hands
    pub rewards: u64,
    pub stats: DecisionStats,
}

/// Tournament results accumulated game by game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    seats: Vec<SeatStanding>,
    games: Vec<GameSummary>,
}

impl Standings {
    pub fn new<S: AsRef<str>>(agent_names: &[S]) -> Self {
        Self {
            seats: agent_names
                .iter()
                .enumerate()
                .map(|(seat, name)| SeatStanding {
                    seat,
                    agent: name.as_ref().to_string(),
                    wins: 0,
                    chips: 0,
                    rewards: 0,
                    stats: DecisionStats::default(),
                })
                .collect(),
            games: Vec::new(),
        }
    }

    pub fn record_game(&mut self, summary: &GameSummary, rewards: &[u64]) {
        if let Some(s) = self.seats.get_mut(summary.winner) {
            s.wins += 1;
        }
        for (s, &c) in self.seats.iter_mut().zip(&summary.chips) {
            s.chips += c as u64;
        }
        for (s, &r) in self.seats.iter_mut().zip(rewards) {
            s.rewards += r;
        }
        self.games.push(summary.clone());
    }

    pub fn set_stats(&mut self, stats: &[DecisionStats]) {
        for (s, st) in self.seats.iter_mut().zip(stats) {
            s.stats = *st;
        }
    }

    pub fn seats(&self) -> &[SeatStanding] {
        &self.seats
    }

    pub fn games(&self) -> &[GameSummary] {
        &self.games
    }

    /// Most wins first, then most chips, then lowest seat id.
    pub fn ranked(&self) -> Vec<&SeatStanding> {
        let mut v: Vec<&SeatStanding> = self.seats.iter().collect();
        v.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(b.chips.cmp(&a.chips))
                .then(a.seat.cmp(&b.seat))
        });
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(game: u32, chips: Vec<u32>) -> GameSummary {
        GameSummary {
            game,
            hands_played: 3,
            winner: chip_leader(&chips),
            chips,
            truncated: false,
        }
    }

    #[test]
    fn chip_leader_prefers_lowest_seat_on_ties() {
        assert_eq!(chip_leader(&[100, 300, 300]), 1);
        assert_eq!(chip_leader(&[0, 0]), 0);
        assert_eq!(chip_leader(&[10, 990]), 1);
    }

    #[test]
    fn ranking_uses_wins_then_chips() {
        let mut st = Standings::new(&["a", "b", "c"]);
        st.record_game(&summary(1, vec![0, 1500, 0]), &[10, 20, 30]);
        st.record_game(&summary(2, vec![0, 0, 1500]), &[1, 2, 3]);
        st.record_game(&summary(3, vec![700, 0, 800]), &[0, 0, 0]);
        let ranked: Vec<usize> = st.ranked().iter().map(|s| s.seat).collect();
        assert_eq!(ranked, vec![2, 1, 0]);
        assert_eq!(st.seats()[2].wins, 2);
        assert_eq!(st.seats()[2].chips, 2300);
        assert_eq!(st.seats()[0].rewards, 11);
        assert_eq!(st.games().len(), 3);
    }

    #[test]
    fn stats_count_substitutions() {
        let mut s = DecisionStats::default();
        s.record(&DecisionOutcome::OnTime);
        s.record(&DecisionOutcome::TimedOut);
        s.record(&DecisionOutcome::AgentFailed {
            reason: "x".to_string(),
        });
        assert_eq!(s.decisions, 3);
        assert_eq!(s.timeouts, 1);
        assert_eq!(s.substituted(), 2);
    }
}
