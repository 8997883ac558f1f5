//! A player's hand: a card multiset.
//!
//! Two physical decks mean every card can appear twice; membership and
//! removal work on physical copies (by card id), removing the first
//! duplicate.

use std::collections::HashMap;

use super::cards_types::{Card, Rank};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
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

    /// Cards sorted for display (suit-major, stable).
    pub fn sorted(&self) -> Vec<Card> {
        let mut v = self.cards.clone();
        v.sort();
        v
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.iter().any(|c| c.id() == card.id())
    }

    /// Exact multiset containment: every card in `cards` must be present at
    /// least as many times as requested.
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut needed: HashMap<u8, usize> = HashMap::new();
        for c in cards {
            *needed.entry(c.id()).or_insert(0) += 1;
        }
        needed.into_iter().all(|(id, n)| {
            self.cards.iter().filter(|c| c.id() == id).count() >= n
        })
    }

    /// Remove the first copy of `card`; false when absent.
    pub fn remove_first(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| c.id() == card.id()) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Remove an exact sequence of cards (multiset semantics). The hand is
    /// untouched when any card is missing.
    pub fn remove_all(&mut self, cards: &[Card]) -> Result<(), DomainError> {
        if !self.contains_all(cards) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                "Card not in hand",
            ));
        }
        for &card in cards {
            self.remove_first(card);
        }
        Ok(())
    }

    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }

    pub fn big_jokers(&self) -> usize {
        self.count_rank(Rank::BigJoker)
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}
