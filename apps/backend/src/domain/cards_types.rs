//! Core card-related types: Card, Rank, Suit

use crate::errors::domain::{DomainError, ValidationKind};

/// Suit order Hearts < Diamonds < Clubs < Spades is the trump tie-break
/// order; Joker is a pseudo-suit paired only with joker ranks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    Joker,
}

impl Suit {
    pub const STANDARD: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Tie-break value among trump-rank cards: Hearts=0 .. Spades=3.
    pub fn numeric(self) -> u8 {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
            Suit::Joker => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    SmallJoker,
    BigJoker,
}

impl Rank {
    pub const STANDARD: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric rank value: 2..=14 for standard ranks, 15/16 for jokers.
    pub fn numeric(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            Rank::SmallJoker => 15,
            Rank::BigJoker => 16,
        }
    }

    pub fn from_numeric(v: u8) -> Option<Rank> {
        match v {
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            15 => Some(Rank::SmallJoker),
            16 => Some(Rank::BigJoker),
            _ => None,
        }
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    /// Next standard rank, None past Ace. Used for level progression.
    pub fn successor(self) -> Option<Rank> {
        match self {
            Rank::Ace | Rank::SmallJoker | Rank::BigJoker => None,
            r => Rank::from_numeric(r.numeric() + 1),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Construct a card, enforcing the joker-suit ↔ joker-rank invariant.
    pub fn new(suit: Suit, rank: Rank) -> Result<Card, DomainError> {
        match (suit, rank) {
            (Suit::Joker, r) if !r.is_joker() => Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Joker suit with non-joker rank {r:?}"),
            )),
            (s, r) if s != Suit::Joker && r.is_joker() => Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("{s:?} suit with joker rank {r:?}"),
            )),
            _ => Ok(Card { suit, rank }),
        }
    }

    pub fn small_joker() -> Card {
        Card {
            suit: Suit::Joker,
            rank: Rank::SmallJoker,
        }
    }

    pub fn big_joker() -> Card {
        Card {
            suit: Suit::Joker,
            rank: Rank::BigJoker,
        }
    }

    pub fn is_joker(self) -> bool {
        self.rank.is_joker()
    }

    /// Stable id over the 54 distinct cards: 0..=51 for the standard deck
    /// (suit-major), 52 SmallJoker, 53 BigJoker. Used for equality of
    /// physical copies and multiset membership.
    pub fn id(self) -> u8 {
        match self.rank {
            Rank::SmallJoker => 52,
            Rank::BigJoker => 53,
            r => self.suit.numeric() * 13 + (r.numeric() - 2),
        }
    }

    pub fn from_id(id: u8) -> Option<Card> {
        match id {
            52 => Some(Card::small_joker()),
            53 => Some(Card::big_joker()),
            0..=51 => {
                let suit = Suit::STANDARD[(id / 13) as usize];
                let rank = Rank::from_numeric(id % 13 + 2)?;
                Some(Card { suit, rank })
            }
            _ => None,
        }
    }
}

// Note: Ord/Eq on Card is only for stable sorting: suit order then rank
// order. Do not use for game-logic comparisons involving trump.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
