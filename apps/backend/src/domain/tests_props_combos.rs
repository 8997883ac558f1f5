//! Property tests for classification.
//!
//! Properties tested:
//! - Input order never affects category, size or canonical rank
//! - Card ids round-trip through parse/format
//! - Classified groups always report their input size

use proptest::prelude::*;

use crate::domain::{test_gens, test_prelude, Card, CardGroup};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: classification is order-insensitive.
    #[test]
    fn prop_classification_ignores_input_order(
        cards in test_gens::deck_cards(10),
        seed in any::<u64>(),
    ) {
        let baseline = CardGroup::classify(cards.clone());

        // Deterministic pseudo-shuffle driven by the seed.
        let mut shuffled = cards;
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }
        let reshuffled = CardGroup::classify(shuffled);

        prop_assert_eq!(baseline.category, reshuffled.category);
        prop_assert_eq!(baseline.rank, reshuffled.rank);
        prop_assert_eq!(baseline.size(), reshuffled.size());
        prop_assert_eq!(baseline.cards, reshuffled.cards);
    }

    /// Property: the group always keeps every input card.
    #[test]
    fn prop_group_size_matches_input(cards in test_gens::deck_cards(12)) {
        let expected = cards.len();
        let group = CardGroup::classify(cards);
        prop_assert_eq!(group.size(), expected);
        prop_assert_eq!(group.cards.len(), expected);
    }

    /// Property: text form round-trips for every card.
    #[test]
    fn prop_card_text_round_trips(card in test_gens::any_card()) {
        let token = card.to_string();
        let back: Card = token.parse().expect("canonical token parses");
        prop_assert_eq!(back, card);
        prop_assert_eq!(back.id(), card.id());
    }
}
