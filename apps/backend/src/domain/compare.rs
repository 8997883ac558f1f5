//! Trump-aware ordering of cards and card groups.
//!
//! The trump rank elevates its 8 cards above every non-joker card; among
//! them the suit breaks ties (Hearts < Diamonds < Clubs < Spades). Group
//! comparison returns `Ordering::Equal` both for genuine ties and for
//! incomparable shapes.

use std::cmp::Ordering;

use super::cards_types::{Card, Rank, Suit};
use super::combos::{CardGroup, Category};

pub const SMALL_JOKER_VALUE: u32 = 1000;
pub const BIG_JOKER_VALUE: u32 = 1001;
pub const TRUMP_BASE: u32 = 500;
pub const TRUMP_BOMB_BASE: u32 = 1000;

/// Numeric value of a single card under the trump rank.
pub fn card_value(card: Card, trump: Rank) -> u32 {
    match card.rank {
        Rank::BigJoker => BIG_JOKER_VALUE,
        Rank::SmallJoker => SMALL_JOKER_VALUE,
        r if r == trump => TRUMP_BASE + card.suit.numeric() as u32,
        r => r.numeric() as u32,
    }
}

pub fn compare_cards(a: Card, b: Card, trump: Rank) -> Ordering {
    card_value(a, trump).cmp(&card_value(b, trump))
}

/// Canonical value of a group for same-shape comparison (rule 7): joker
/// singles keep their joker values, trump-rank-led groups are elevated to
/// 500 + suit of their lowest trump-rank card, everything else is the
/// numeric canonical rank.
fn group_value(group: &CardGroup, trump: Rank) -> u32 {
    match group.rank {
        Rank::BigJoker => BIG_JOKER_VALUE,
        Rank::SmallJoker => SMALL_JOKER_VALUE,
        r if r == trump => {
            let suit = group
                .cards
                .iter()
                .filter(|c| c.rank == trump)
                .map(|c| c.suit.numeric())
                .min()
                .unwrap_or(Suit::Hearts.numeric());
            TRUMP_BASE + suit as u32
        }
        r => r.numeric() as u32,
    }
}

fn bomb_value(group: &CardGroup, trump: Rank) -> u32 {
    let rank = group.rank.numeric() as u32;
    if group.rank == trump {
        TRUMP_BOMB_BASE + rank
    } else {
        rank
    }
}

/// Total comparison of two valid groups. `Equal` doubles as "incomparable":
/// different non-bomb categories or sizes never beat each other.
pub fn compare_groups(a: &CardGroup, b: &CardGroup, trump: Rank) -> Ordering {
    match (a.category, b.category) {
        (Category::JokerBomb, Category::JokerBomb) => a.size().cmp(&b.size()),
        (Category::JokerBomb, _) => Ordering::Greater,
        (_, Category::JokerBomb) => Ordering::Less,
        (Category::Bomb, Category::Bomb) => bomb_value(a, trump).cmp(&bomb_value(b, trump)),
        (Category::Bomb, _) => Ordering::Greater,
        (_, Category::Bomb) => Ordering::Less,
        (ca, cb) if ca != cb => Ordering::Equal,
        _ if a.size() != b.size() => Ordering::Equal,
        _ => group_value(a, trump).cmp(&group_value(b, trump)),
    }
}

/// Whether `a` may be played over `b`. An absent or invalid `b` is an
/// opening play: any valid group may start.
pub fn can_beat(a: &CardGroup, b: Option<&CardGroup>, trump: Rank) -> bool {
    if !a.is_valid() {
        return false;
    }
    match b {
        None => true,
        Some(b) if !b.is_valid() => true,
        Some(b) => compare_groups(a, b, trump) == Ordering::Greater,
    }
}

/// Follow rules: bombs overtake any shape they out-compare; everything else
/// must match the table play's category and size and then beat it.
pub fn can_follow(a: &CardGroup, b: Option<&CardGroup>, trump: Rank) -> bool {
    if !a.is_valid() {
        return false;
    }
    match b {
        None => true,
        Some(b) if !b.is_valid() => true,
        Some(b) => {
            if a.is_bomb_kind() {
                compare_groups(a, b, trump) == Ordering::Greater
            } else {
                a.category == b.category
                    && a.size() == b.size()
                    && compare_groups(a, b, trump) == Ordering::Greater
            }
        }
    }
}
