use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// A 52-card deck drawn without replacement. Shuffles are reproducible from
/// the seed; every `shuffle` restores all 52 cards first.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn draw(&mut self) -> Result<Card, EngineError> {
        let c = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(EngineError::EmptyDeck)?;
        self.position += 1;
        Ok(c)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
