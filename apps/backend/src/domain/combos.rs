//! Card-combination classification.
//!
//! A `CardGroup` is a card multiset together with its category, size and
//! canonical rank. Classification is pure and order-insensitive; trump only
//! matters later, during comparison.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Single,
    Pair,
    Triple,
    Straight,
    PairStraight,
    TripleStraight,
    Bomb,
    JokerBomb,
    /// Sentinel for unclassifiable multisets; keeps the original cards.
    Invalid,
}

impl Category {
    /// Bomb kinds overtake other categories when following.
    pub fn is_bomb_kind(self) -> bool {
        matches!(self, Category::Bomb | Category::JokerBomb)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGroup {
    pub cards: Vec<Card>,
    pub category: Category,
    /// Canonical rank: the uniform rank for Single/Pair/Triple/Bomb, the
    /// lowest rank of the run for straights, BigJoker for joker bombs.
    pub rank: Rank,
}

impl CardGroup {
    /// Classify a non-empty card multiset. Input order never affects the
    /// result; the stored cards are sorted.
    pub fn classify(mut cards: Vec<Card>) -> CardGroup {
        cards.sort();
        let (category, rank) = classify_sorted(&cards);
        CardGroup {
            cards,
            category,
            rank,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.category != Category::Invalid
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_bomb_kind(&self) -> bool {
        self.category.is_bomb_kind()
    }
}

fn classify_sorted(cards: &[Card]) -> (Category, Rank) {
    let invalid = || {
        (
            Category::Invalid,
            cards.first().map(|c| c.rank).unwrap_or(Rank::Two),
        )
    };

    if cards.is_empty() {
        return invalid();
    }

    // Joker-bomb detection takes precedence at every size >= 2.
    if cards.len() >= 2 && cards.iter().all(|c| c.is_joker()) {
        return (Category::JokerBomb, Rank::BigJoker);
    }

    let uniform_rank = uniform_rank(cards);
    match cards.len() {
        1 => (Category::Single, cards[0].rank),
        2 => match uniform_rank {
            Some(r) => (Category::Pair, r),
            None => invalid(),
        },
        3 => match uniform_rank {
            Some(r) => (Category::Triple, r),
            None => invalid(),
        },
        4 => match uniform_rank {
            Some(r) => (Category::Bomb, r),
            None => invalid(),
        },
        _ => {
            if let Some(low) = run_of(cards, 1) {
                (Category::Straight, low)
            } else if let Some(low) = run_of(cards, 2) {
                (Category::PairStraight, low)
            } else if let Some(low) = run_of(cards, 3) {
                (Category::TripleStraight, low)
            } else {
                invalid()
            }
        }
    }
}

fn uniform_rank(cards: &[Card]) -> Option<Rank> {
    let first = cards.first()?.rank;
    cards.iter().all(|c| c.rank == first).then_some(first)
}

/// Check for a contiguous run where every rank appears exactly `copies`
/// times. Jokers never participate; Ace sits at its numeric position 14 and
/// wrap-around is not permitted. Returns the lowest rank of the run.
fn run_of(cards: &[Card], copies: usize) -> Option<Rank> {
    let min_ranks = match copies {
        1 => 5,
        2 => 3,
        3 => 2,
        _ => return None,
    };
    if cards.len() % copies != 0 || cards.len() / copies < min_ranks {
        return None;
    }
    if cards.iter().any(|c| c.is_joker()) {
        return None;
    }

    let mut counts = [0usize; 15]; // index by numeric rank 2..=14
    for c in cards {
        counts[c.rank.numeric() as usize] += 1;
    }

    let lo = cards.iter().map(|c| c.rank.numeric()).min()?;
    let span = cards.len() / copies;
    if lo as usize + span - 1 > 14 {
        return None;
    }
    // The window sums to exactly cards.len(), so any stray rank above it
    // leaves a hole inside and fails here.
    for v in lo..lo + span as u8 {
        if counts[v as usize] != copies {
            return None;
        }
    }
    Rank::from_numeric(lo)
}
