//! The 108-card Guandan deck: two standard decks plus four jokers,
//! deterministic seeded shuffling, contiguous dealing.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cards_types::{Card, Rank, Suit};

pub const DECK_SIZE: usize = 108;
pub const CARDS_PER_PLAYER: usize = 27;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full 108-card deck in standard order: two copies of every standard
    /// card, then two SmallJokers and two BigJokers.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for _ in 0..2 {
            for suit in Suit::STANDARD {
                for rank in Rank::STANDARD {
                    cards.push(Card { suit, rank });
                }
            }
        }
        cards.push(Card::small_joker());
        cards.push(Card::small_joker());
        cards.push(Card::big_joker());
        cards.push(Card::big_joker());
        Self { cards }
    }

    /// Build and shuffle with a deterministic seed.
    pub fn shuffled(seed: u64) -> Self {
        let mut deck = Self::new();
        deck.shuffle(seed);
        deck
    }

    /// Fisher-Yates shuffle driven by a seeded ChaCha generator.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Draw up to `amount` cards from the top. Drawing more than remain
    /// consumes everything without error.
    pub fn draw(&mut self, amount: usize) -> Vec<Card> {
        let take = amount.min(self.cards.len());
        self.cards.drain(..take).collect()
    }

    /// Deal the whole deck to `players` (1..=4) hands as contiguous
    /// prefixes; returns the original card index ranges implicitly through
    /// ordering (hand `i` holds positions `i*size .. (i+1)*size`).
    pub fn deal(&mut self, players: usize) -> Vec<Vec<Card>> {
        debug_assert!((1..=4).contains(&players));
        let size = self.cards.len() / players;
        (0..players).map(|_| self.draw(size)).collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
