//! Tribute subsystem tests: scenario classification, immunity, card rules.

use std::collections::BTreeMap;

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::tribute::{
    classify_scenario, has_immunity, required_tribute_card, validate_return_card,
    validate_tribute_card, TributeInfo, TributePhase, TributeScenario,
};
use crate::domain::state::Seat::{East, North, South, West};
use crate::domain::{Card, Rank, Seat};

fn jokers(pairs: &[(Seat, usize)]) -> BTreeMap<Seat, usize> {
    pairs.iter().copied().collect()
}

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("test tokens parse")
}

#[test]
fn scenario_follows_team_composition() {
    // 1st and 2nd on the same team.
    assert_eq!(
        classify_scenario(&[East, West, South, North]),
        TributeScenario::DoubleDown
    );
    assert_eq!(
        classify_scenario(&[South, North, East, West]),
        TributeScenario::DoubleDown
    );
    // 1st and 3rd on the same team.
    assert_eq!(
        classify_scenario(&[East, South, West, North]),
        TributeScenario::SingleLast
    );
    // 1st and 4th on the same team.
    assert_eq!(
        classify_scenario(&[East, South, North, West]),
        TributeScenario::PartnerLast
    );
}

#[test]
fn immunity_thresholds_per_scenario() {
    let rankings = [East, West, South, North];
    // DoubleDown: 3rd + 4th hold two big jokers together.
    assert!(has_immunity(
        TributeScenario::DoubleDown,
        &rankings,
        &jokers(&[(South, 1), (North, 1)])
    ));
    assert!(has_immunity(
        TributeScenario::DoubleDown,
        &rankings,
        &jokers(&[(South, 2)])
    ));
    assert!(!has_immunity(
        TributeScenario::DoubleDown,
        &rankings,
        &jokers(&[(South, 1)])
    ));

    let rankings = [East, South, West, North];
    // SingleLast: 4th alone needs both.
    assert!(has_immunity(
        TributeScenario::SingleLast,
        &rankings,
        &jokers(&[(North, 2)])
    ));
    assert!(!has_immunity(
        TributeScenario::SingleLast,
        &rankings,
        &jokers(&[(North, 1), (West, 1)])
    ));

    let rankings = [East, South, North, West];
    // PartnerLast: 3rd alone needs both.
    assert!(has_immunity(
        TributeScenario::PartnerLast,
        &rankings,
        &jokers(&[(North, 2)])
    ));
    assert!(!has_immunity(
        TributeScenario::PartnerLast,
        &rankings,
        &jokers(&[(West, 2)])
    ));
}

#[test]
fn initialize_builds_requests_per_scenario() {
    // DoubleDown: 3rd→1st, 4th→2nd; returns 1st→3rd, 2nd→4th.
    let info = TributeInfo::initialize(Some([East, West, South, North]), &jokers(&[]));
    assert_eq!(info.scenario, TributeScenario::DoubleDown);
    assert!(!info.has_immunity);
    assert_eq!(info.phase, TributePhase::Requested);
    assert_eq!(info.tribute_requests.get(&South), Some(&East));
    assert_eq!(info.tribute_requests.get(&North), Some(&West));
    assert_eq!(info.return_requests.get(&East), Some(&South));
    assert_eq!(info.return_requests.get(&West), Some(&North));

    // SingleLast: 4th→1st.
    let info = TributeInfo::initialize(Some([East, South, West, North]), &jokers(&[]));
    assert_eq!(info.scenario, TributeScenario::SingleLast);
    assert_eq!(info.tribute_requests.get(&North), Some(&East));
    assert_eq!(info.tribute_requests.len(), 1);
    assert_eq!(info.return_requests.get(&East), Some(&North));

    // PartnerLast: 3rd→1st.
    let info = TributeInfo::initialize(Some([East, South, North, West]), &jokers(&[]));
    assert_eq!(info.scenario, TributeScenario::PartnerLast);
    assert_eq!(info.tribute_requests.get(&North), Some(&East));
    assert_eq!(info.return_requests.get(&East), Some(&North));
}

#[test]
fn initialize_short_circuits_without_rankings_or_with_immunity() {
    let info = TributeInfo::initialize(None, &jokers(&[]));
    assert_eq!(info.scenario, TributeScenario::None);
    assert_eq!(info.phase, TributePhase::Completed);
    assert!(info.tribute_requests.is_empty());

    let info = TributeInfo::initialize(
        Some([East, South, West, North]),
        &jokers(&[(North, 2)]),
    );
    assert_eq!(info.scenario, TributeScenario::SingleLast);
    assert!(info.has_immunity);
    assert_eq!(info.phase, TributePhase::Completed);
    assert!(info.tribute_requests.is_empty());
}

#[test]
fn tribute_card_is_the_highest_excluding_trump_hearts() {
    let trump = Rank::Five;
    let hand = cards(&["♥5", "♠5", "♠A", "♦9"]);
    // ♥5 is excluded; ♠5 (trump) outranks the ace.
    let required = required_tribute_card(&hand, trump).unwrap();
    assert_eq!(required, "♠5".parse().unwrap());

    // Jokers top everything.
    let hand = cards(&["SJ", "♠5", "♠A"]);
    assert_eq!(
        required_tribute_card(&hand, trump).unwrap(),
        Card::small_joker()
    );

    // Only Hearts-of-trump left: tribute is unavailable.
    let hand = cards(&["♥5", "♥5"]);
    assert!(required_tribute_card(&hand, trump).is_err());
}

#[test]
fn tribute_card_validation() {
    let trump = Rank::Five;
    let hand = cards(&["♠A", "♠A", "♦9", "♥5"]);

    // The top card passes; a physical duplicate of it too.
    assert!(validate_tribute_card(&hand, "♠A".parse().unwrap(), trump).is_ok());
    // A lower card is rejected.
    assert!(validate_tribute_card(&hand, "♦9".parse().unwrap(), trump).is_err());
    // Hearts of the trump rank is never payable.
    assert!(validate_tribute_card(&hand, "♥5".parse().unwrap(), trump).is_err());
}

#[test]
fn return_card_must_be_low_and_joker_free() {
    assert!(validate_return_card("♠2".parse().unwrap()).is_ok());
    assert!(validate_return_card("♦T".parse().unwrap()).is_ok());
    assert!(validate_return_card("♠J".parse().unwrap()).is_err());
    assert!(validate_return_card("♠A".parse().unwrap()).is_err());
    assert!(validate_return_card(Card::small_joker()).is_err());
    assert!(validate_return_card(Card::big_joker()).is_err());
}
