// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::{Card, Rank, Suit};

/// Generate a standard (non-joker) suit.
pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
        Just(Suit::Spades),
    ]
}

/// Generate a standard rank (Two..=Ace).
pub fn standard_rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::STANDARD.to_vec())
}

/// Generate a standard (non-joker) card.
pub fn standard_card() -> impl Strategy<Value = Card> {
    (suit(), standard_rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// Generate any of the 54 distinct cards.
pub fn any_card() -> impl Strategy<Value = Card> {
    (0u8..54).prop_map(|id| Card::from_id(id).expect("id in range"))
}

/// Generate a multiset of 1..=max cards drawn from the full 108-card deck,
/// so duplicates appear exactly as they can in real hands.
pub fn deck_cards(max: usize) -> impl Strategy<Value = Vec<Card>> {
    let deck: Vec<u8> = (0..54).flat_map(|id| [id, id]).collect();
    prop::sample::subsequence(deck, 1..=max)
        .prop_map(|ids| ids.into_iter().map(|id| Card::from_id(id).expect("id")).collect())
}
