//! Card parsing and formatting.
//!
//! One canonical textual form, enforced both ways: a Unicode suit symbol
//! followed by a rank letter ("♥2", "♦T", "♠A"), or the joker literals
//! "SJ" / "BJ".

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn suit_symbol(suit: Suit) -> char {
    match suit {
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
        Suit::Spades => '♠',
        // Jokers never render a suit symbol.
        Suit::Joker => '?',
    }
}

fn rank_letter(rank: Rank) -> char {
    match rank {
        Rank::Two => '2',
        Rank::Three => '3',
        Rank::Four => '4',
        Rank::Five => '5',
        Rank::Six => '6',
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
        Rank::SmallJoker | Rank::BigJoker => '?',
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Rank::SmallJoker => write!(f, "SJ"),
            Rank::BigJoker => write!(f, "BJ"),
            rank => write!(f, "{}{}", suit_symbol(self.suit), rank_letter(rank)),
        }
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SJ" => return Ok(Card::small_joker()),
            "BJ" => return Ok(Card::big_joker()),
            _ => {}
        }

        let mut chars = s.chars();
        let (Some(suit_ch), Some(rank_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Parse card: {s:?}"),
            ));
        };

        let suit = match suit_ch {
            '♥' => Suit::Hearts,
            '♦' => Suit::Diamonds,
            '♣' => Suit::Clubs,
            '♠' => Suit::Spades,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseCard,
                    format!("Parse card: {s:?}"),
                ))
            }
        };
        let rank = match rank_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseCard,
                    format!("Parse card: {s:?}"),
                ))
            }
        };
        Ok(Card { suit, rank })
    }
}

/// Non-panicking helper to parse card tokens into Card instances.
/// Fails on the first invalid token.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}
