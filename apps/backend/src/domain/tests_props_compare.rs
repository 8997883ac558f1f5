//! Property tests for trump-aware comparison.
//!
//! Properties tested:
//! - Card comparison is total and antisymmetric; every card equals itself
//! - Any valid bomb follows any valid pair
//! - Group comparison is antisymmetric for valid groups

use std::cmp::Ordering;

use proptest::prelude::*;

use crate::domain::{
    can_follow, compare_cards, compare_groups, test_gens, test_prelude, Card, CardGroup, Rank,
};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: compare(a,b) = Greater ⇔ compare(b,a) = Less, and
    /// compare(a,a) = Equal, for every trump rank.
    #[test]
    fn prop_card_comparison_antisymmetric(
        a in test_gens::any_card(),
        b in test_gens::any_card(),
        trump in test_gens::standard_rank(),
    ) {
        let ab = compare_cards(a, b, trump);
        let ba = compare_cards(b, a, trump);
        prop_assert_eq!(ab, ba.reverse());
        prop_assert_eq!(compare_cards(a, a, trump), Ordering::Equal);
    }

    /// Property: every 4-of-a-kind bomb follows every pair.
    #[test]
    fn prop_bomb_overtakes_pair(
        bomb_rank in test_gens::standard_rank(),
        pair_card in test_gens::standard_card(),
        trump in test_gens::standard_rank(),
    ) {
        let bomb = CardGroup::classify(
            crate::domain::Suit::STANDARD
                .into_iter()
                .map(|suit| Card { suit, rank: bomb_rank })
                .collect(),
        );
        let pair = CardGroup::classify(vec![pair_card, pair_card]);
        prop_assert!(bomb.is_valid());
        prop_assert!(pair.is_valid());
        prop_assert!(can_follow(&bomb, Some(&pair), trump));
    }

    /// Property: joker bombs follow everything valid that is not a bigger
    /// joker bomb.
    #[test]
    fn prop_joker_bomb_overtakes_pairs_and_bombs(
        pair_card in test_gens::standard_card(),
        bomb_rank in test_gens::standard_rank(),
        trump in test_gens::standard_rank(),
    ) {
        let jb = CardGroup::classify(vec![Card::small_joker(), Card::big_joker()]);
        let pair = CardGroup::classify(vec![pair_card, pair_card]);
        let bomb = CardGroup::classify(
            crate::domain::Suit::STANDARD
                .into_iter()
                .map(|suit| Card { suit, rank: bomb_rank })
                .collect(),
        );
        prop_assert!(can_follow(&jb, Some(&pair), trump));
        prop_assert!(can_follow(&jb, Some(&bomb), trump));
        prop_assert!(!can_follow(&bomb, Some(&jb), trump));
    }

    /// Property: group comparison is antisymmetric whenever both groups are
    /// valid.
    #[test]
    fn prop_group_comparison_antisymmetric(
        a in test_gens::deck_cards(8),
        b in test_gens::deck_cards(8),
        trump in test_gens::standard_rank(),
    ) {
        let ga = CardGroup::classify(a);
        let gb = CardGroup::classify(b);
        prop_assume!(ga.is_valid() && gb.is_valid());
        let ab = compare_groups(&ga, &gb, trump);
        let ba = compare_groups(&gb, &ga, trump);
        prop_assert_eq!(ab, ba.reverse());
    }

    /// Property: a group never strictly beats itself.
    #[test]
    fn prop_group_never_beats_itself(
        cards in test_gens::deck_cards(8),
        trump in test_gens::standard_rank(),
    ) {
        let group = CardGroup::classify(cards);
        prop_assume!(group.is_valid());
        prop_assert_eq!(compare_groups(&group, &group, trump), Ordering::Equal);
    }
}

#[test]
fn jokers_compare_above_trump_cards_for_every_trump() {
    for trump in Rank::STANDARD {
        for suit in crate::domain::Suit::STANDARD {
            let trump_card = Card { suit, rank: trump };
            assert_eq!(
                compare_cards(Card::small_joker(), trump_card, trump),
                Ordering::Greater
            );
            assert_eq!(
                compare_cards(Card::big_joker(), Card::small_joker(), trump),
                Ordering::Greater
            );
        }
    }
}
