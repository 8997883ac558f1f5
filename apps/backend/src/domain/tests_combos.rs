//! Classification tests for `CardGroup::classify`.

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::{Card, CardGroup, Category, Rank};

fn classify(tokens: &[&str]) -> CardGroup {
    CardGroup::classify(try_parse_cards(tokens).expect("test tokens parse"))
}

fn assert_category(tokens: &[&str], category: Category, rank: Rank) {
    let group = classify(tokens);
    assert_eq!(group.category, category, "cards {tokens:?}");
    assert_eq!(group.rank, rank, "cards {tokens:?}");
    assert_eq!(group.size(), tokens.len());
}

#[test]
fn singles_pairs_triples() {
    assert_category(&["♠7"], Category::Single, Rank::Seven);
    assert_category(&["SJ"], Category::Single, Rank::SmallJoker);
    assert_category(&["♠K", "♥K"], Category::Pair, Rank::King);
    assert_category(&["♠K", "♠K"], Category::Pair, Rank::King);
    assert_category(&["♠4", "♥4", "♦4"], Category::Triple, Rank::Four);
}

#[test]
fn mixed_ranks_are_invalid() {
    assert_eq!(classify(&["♠K", "♥Q"]).category, Category::Invalid);
    assert_eq!(classify(&["♠4", "♥4", "♦5"]).category, Category::Invalid);
    assert_eq!(classify(&["♠4", "♥4", "♦4", "♣5"]).category, Category::Invalid);
    // A joker mixed into a pair is neither a pair nor a joker bomb.
    assert_eq!(classify(&["♠K", "SJ"]).category, Category::Invalid);
}

#[test]
fn bombs_are_exactly_four_of_a_kind() {
    assert_category(&["♠Q", "♥Q", "♦Q", "♣Q"], Category::Bomb, Rank::Queen);
    assert_category(&["♠Q", "♠Q", "♥Q", "♦Q"], Category::Bomb, Rank::Queen);
    // Five of a kind does not classify.
    assert_eq!(
        classify(&["♠Q", "♠Q", "♥Q", "♥Q", "♦Q"]).category,
        Category::Invalid
    );
}

#[test]
fn joker_bombs_take_precedence_at_every_size() {
    assert_category(&["SJ", "SJ"], Category::JokerBomb, Rank::BigJoker);
    assert_category(&["SJ", "BJ"], Category::JokerBomb, Rank::BigJoker);
    assert_category(&["SJ", "SJ", "BJ"], Category::JokerBomb, Rank::BigJoker);
    assert_category(&["SJ", "SJ", "BJ", "BJ"], Category::JokerBomb, Rank::BigJoker);
}

#[test]
fn straights_run_five_or_more_without_wrap() {
    assert_category(&["♠3", "♥4", "♦5", "♣6", "♠7"], Category::Straight, Rank::Three);
    assert_category(
        &["♠T", "♥J", "♦Q", "♣K", "♠A"],
        Category::Straight,
        Rank::Ten,
    );
    assert_category(
        &["♠2", "♥3", "♦4", "♣5", "♠6", "♥7"],
        Category::Straight,
        Rank::Two,
    );
    // Four contiguous ranks are not a straight.
    assert_eq!(classify(&["♠3", "♥4", "♦5", "♣6"]).category, Category::Invalid);
    // Gap breaks the run.
    assert_eq!(
        classify(&["♠3", "♥4", "♦5", "♣6", "♠8"]).category,
        Category::Invalid
    );
    // No wrap-around past Ace.
    assert_eq!(
        classify(&["♠Q", "♥K", "♦A", "♣2", "♠3"]).category,
        Category::Invalid
    );
    // Duplicated rank inside the window is not a straight.
    assert_eq!(
        classify(&["♠3", "♥3", "♦4", "♣5", "♠6"]).category,
        Category::Invalid
    );
}

#[test]
fn pair_straights() {
    assert_category(
        &["♠3", "♥3", "♦4", "♣4", "♠5", "♥5"],
        Category::PairStraight,
        Rank::Three,
    );
    assert_category(
        &["♠J", "♥J", "♦Q", "♣Q", "♠K", "♥K", "♦A", "♣A"],
        Category::PairStraight,
        Rank::Jack,
    );
    // Two pairs only is too short.
    assert_eq!(
        classify(&["♠3", "♥3", "♦4", "♣4"]).category,
        Category::Invalid
    );
    // A rank appearing once breaks the shape.
    assert_eq!(
        classify(&["♠3", "♥3", "♦4", "♠5", "♥5", "♦6"]).category,
        Category::Invalid
    );
}

#[test]
fn triple_straights() {
    assert_category(
        &["♠8", "♥8", "♦8", "♣9", "♠9", "♥9"],
        Category::TripleStraight,
        Rank::Eight,
    );
    assert_category(
        &["♠5", "♥5", "♦5", "♣6", "♠6", "♥6", "♦7", "♣7", "♠7"],
        Category::TripleStraight,
        Rank::Five,
    );
    // Non-contiguous triples.
    assert_eq!(
        classify(&["♠8", "♥8", "♦8", "♣T", "♠T", "♥T"]).category,
        Category::Invalid
    );
}

#[test]
fn invalid_keeps_the_original_cards() {
    let cards = try_parse_cards(["♠K", "♥Q", "♦2"]).unwrap();
    let group = CardGroup::classify(cards.clone());
    assert_eq!(group.category, Category::Invalid);
    assert!(!group.is_valid());
    let mut sorted: Vec<Card> = cards;
    sorted.sort();
    assert_eq!(group.cards, sorted);
}
