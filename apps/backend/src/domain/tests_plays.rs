//! Legal-play enumeration tests: soundness and completeness.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::{can_follow, legal_plays, test_gens, test_prelude, Card, CardGroup, Rank};

fn hand(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("test tokens parse")
}

fn group(tokens: &[&str]) -> CardGroup {
    CardGroup::classify(hand(tokens))
}

fn id_key(cards: &[Card]) -> Vec<u8> {
    let mut ids: Vec<u8> = cards.iter().map(|c| c.id()).collect();
    ids.sort_unstable();
    ids
}

/// Reference implementation: scan every subset of the hand (exponential,
/// test-only) and keep valid groups that follow the table play.
fn brute_force(hand: &[Card], table: Option<&CardGroup>, trump: Rank) -> BTreeSet<Vec<u8>> {
    let mut out = BTreeSet::new();
    for mask in 1u32..(1 << hand.len()) {
        let subset: Vec<Card> = hand
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| *c)
            .collect();
        let group = CardGroup::classify(subset);
        if group.is_valid() && can_follow(&group, table, trump) {
            out.insert(id_key(&group.cards));
        }
    }
    out
}

#[test]
fn opening_plays_from_a_small_hand() {
    let hand = hand(&["♠3", "♥3", "♦4", "♠5"]);
    let plays = legal_plays(&hand, None, Rank::Two);
    let keys: BTreeSet<Vec<u8>> = plays.iter().map(|g| id_key(&g.cards)).collect();

    // Four distinct singles plus the pair of threes.
    assert_eq!(keys, brute_force(&hand, None, Rank::Two));
    assert_eq!(plays.len(), keys.len(), "no duplicate plays");
    assert_eq!(keys.len(), 5);
}

#[test]
fn follow_is_pruned_to_shape_plus_bombs() {
    let hand = hand(&[
        "♠K", "♥K", "♠A", "♥A", "♠9", "♥9", "♦9", "♣9", "SJ", "BJ",
    ]);
    let table = group(&["♠Q", "♥Q"]);
    let plays = legal_plays(&hand, Some(&table), Rank::Two);

    for play in &plays {
        assert!(play.is_valid());
        assert!(can_follow(play, Some(&table), Rank::Two));
    }

    let keys: BTreeSet<Vec<u8>> = plays.iter().map(|g| id_key(&g.cards)).collect();
    assert_eq!(keys, brute_force(&hand, Some(&table), Rank::Two));

    // Pairs of kings and aces, the nine bomb, and the joker bomb all follow.
    assert_eq!(keys.len(), 4);
}

#[test]
fn duplicates_from_two_decks_do_not_duplicate_plays() {
    let hand = hand(&["♠K", "♠K", "♥K"]);
    let plays = legal_plays(&hand, None, Rank::Two);
    let keys: BTreeSet<Vec<u8>> = plays.iter().map(|g| id_key(&g.cards)).collect();
    // Singles: ♠K, ♥K. Pairs: ♠K♠K, ♠K♥K. Triple: ♠K♠K♥K.
    assert_eq!(plays.len(), keys.len());
    assert_eq!(keys.len(), 5);
}

#[test]
fn unbeatable_table_play_yields_nothing() {
    let hand = hand(&["♠3", "♥4", "♦6"]);
    let table = group(&["BJ", "BJ", "SJ", "SJ"]);
    assert!(legal_plays(&hand, Some(&table), Rank::Two).is_empty());
}

#[test]
fn straights_enumerate_suit_choices_distinctly() {
    let hand = hand(&["♠3", "♥3", "♦4", "♣5", "♠6", "♥7"]);
    let plays = legal_plays(&hand, None, Rank::Two);
    let straights: Vec<&CardGroup> = plays
        .iter()
        .filter(|g| g.category == crate::domain::Category::Straight)
        .collect();
    // 3-7 with either three: two distinct straights.
    assert_eq!(straights.len(), 2);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: enumeration equals the brute-force reference for hands of
    /// up to 10 cards, opening and following.
    #[test]
    fn prop_enumeration_matches_brute_force(
        hand in test_gens::deck_cards(10),
        table in test_gens::deck_cards(6),
        trump in test_gens::standard_rank(),
    ) {
        let open = legal_plays(&hand, None, trump);
        let open_keys: BTreeSet<Vec<u8>> = open.iter().map(|g| id_key(&g.cards)).collect();
        prop_assert_eq!(open.len(), open_keys.len(), "duplicate opening plays");
        prop_assert_eq!(open_keys, brute_force(&hand, None, trump));

        let table = CardGroup::classify(table);
        prop_assume!(table.is_valid());
        let follow = legal_plays(&hand, Some(&table), trump);
        let follow_keys: BTreeSet<Vec<u8>> = follow.iter().map(|g| id_key(&g.cards)).collect();
        prop_assert_eq!(follow.len(), follow_keys.len(), "duplicate follow plays");
        prop_assert_eq!(follow_keys, brute_force(&hand, Some(&table), trump));
    }
}
