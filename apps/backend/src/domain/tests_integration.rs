//! End-to-end scenarios against the engine: opening play, bombs, tribute
//! flows with and without immunity.

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::contexts::DealPhase;
use crate::domain::deck::DECK_SIZE;
use crate::domain::events::GameEvent;
use crate::domain::state::Seat;
use crate::domain::tests_engine::{cards_in_play, engine_at_first_play, test_engine};
use crate::domain::tribute::{TributePhase, TributeScenario};
use crate::domain::state::Seat::{East, North, South, West};
use crate::domain::{Card, CardGroup, Category, Rank};

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("test tokens parse")
}

/// S1 — first-deal opening play with a fixed seed.
#[test]
fn s1_first_deal_opening_play() {
    let mut engine = engine_at_first_play(12345);

    for seat in Seat::ALL {
        assert_eq!(engine.match_ctx().player(seat).hand.len(), 27);
    }
    assert_eq!(engine.deal().unwrap().trump, Rank::Two);

    let (_, holder) = engine.deal().unwrap().starting_card.unwrap();
    let leader = engine.current_player().unwrap();
    assert_eq!(leader, holder, "starting-card holder leads");

    let first_card = engine.match_ctx().player(leader).hand.cards()[0];
    let events = engine.play_cards(leader, vec![first_card]).unwrap();

    assert!(matches!(
        &events[0],
        GameEvent::CardsPlayed { seat, cards, .. } if *seat == leader && cards == &vec![first_card]
    ));
    assert_eq!(engine.match_ctx().player(leader).hand.len(), 26);
    let trick = engine.trick().unwrap();
    assert_eq!(trick.last_player, Some(leader));
    assert_eq!(trick.current_player, leader.next());
}

/// S2 — a bomb overtakes a pair.
#[test]
fn s2_bomb_overtakes_pair() {
    let mut engine = engine_at_first_play(777);

    engine.set_hand_for_test(North, cards(&["♠Q", "♣Q", "♥Q", "♦Q", "♠3"]));
    engine.deal_mut_for_test().phase = DealPhase::InProgress;
    {
        let trick = engine.trick_mut_for_test();
        trick.last_play = Some(CardGroup::classify(cards(&["♠K", "♥K"])));
        trick.last_player = Some(South);
        trick.current_player = North;
    }

    let events = engine
        .play_cards(North, cards(&["♠Q", "♣Q", "♥Q", "♦Q"]))
        .unwrap();
    match &events[0] {
        GameEvent::CardsPlayed { seat, category, .. } => {
            assert_eq!(*seat, North);
            assert_eq!(*category, Category::Bomb);
        }
        other => panic!("expected CardsPlayed, got {other:?}"),
    }
    let trick = engine.trick().unwrap();
    assert_eq!(trick.last_player, Some(North));
    assert_eq!(trick.last_play.as_ref().unwrap().category, Category::Bomb);
    assert_eq!(engine.match_ctx().player(North).hand.len(), 1);
}

/// S3 — Double-Down tribute without immunity, including the selection
/// sub-protocol and the return-request rebinding.
#[test]
fn s3_double_down_tribute_and_selection() {
    let mut engine = test_engine(31);
    engine.set_last_rankings_for_test([East, West, South, North]);
    engine.start_deal(2, East).unwrap();
    engine.deal_cards().unwrap();
    engine.determine_trump().unwrap();

    // Control the losing side's big jokers: South one, North none.
    engine.set_hand_for_test(South, cards(&["BJ", "♠9", "♦3", "♣6", "♠2"]));
    engine.set_hand_for_test(North, cards(&["♠K", "♥8", "♦4", "♣5", "♠6"]));
    engine.set_hand_for_test(East, cards(&["♠A", "♥7", "♦2", "♣3", "♠4"]));
    engine.set_hand_for_test(West, cards(&["♠T", "♥6", "♦7", "♣8", "♠5"]));

    let events = engine.start_tribute().unwrap();
    let deal = engine.deal().unwrap();
    assert_eq!(deal.phase, DealPhase::Tribute);
    assert_eq!(deal.tribute.scenario, TributeScenario::DoubleDown);
    assert!(!deal.tribute.has_immunity);
    assert_eq!(deal.tribute.tribute_requests.get(&South), Some(&East));
    assert_eq!(deal.tribute.tribute_requests.get(&North), Some(&West));
    assert!(matches!(events[0], GameEvent::TributeRequested { .. }));

    // Wrong pair and wrong card are rejected.
    assert!(engine.give_tribute(South, West, "BJ".parse().unwrap()).is_err());
    assert!(engine.give_tribute(South, East, "♠9".parse().unwrap()).is_err());

    // Both tributes go into the pool; the second arrival triggers Selection.
    engine.give_tribute(South, East, "BJ".parse().unwrap()).unwrap();
    assert_eq!(engine.phase(), DealPhase::Tribute);
    let events = engine
        .give_tribute(North, West, "♠K".parse().unwrap())
        .unwrap();
    assert_eq!(engine.phase(), DealPhase::TributeSelection);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TributeSelectionRequested { chooser, .. } if *chooser == East)));
    // Pooled cards are held by nobody.
    assert_eq!(engine.match_ctx().player(East).hand.len(), 5);
    assert_eq!(engine.match_ctx().player(West).hand.len(), 5);

    // Only 1st picks; picking South's big joker binds West to North's king.
    assert!(engine.select_tribute_card(West, South).is_err());
    let events = engine.select_tribute_card(East, South).unwrap();
    assert!(matches!(
        &events[0],
        GameEvent::TributeCardSelected { chooser, giver, card, .. }
            if *chooser == East && *giver == South && *card == Card::big_joker()
    ));

    let deal = engine.deal().unwrap();
    assert_eq!(deal.phase, DealPhase::ReturnTribute);
    assert_eq!(deal.tribute.return_requests.get(&East), Some(&South));
    assert_eq!(deal.tribute.return_requests.get(&West), Some(&North));
    assert!(engine.match_ctx().player(East).hand.contains(Card::big_joker()));
    assert!(engine
        .match_ctx()
        .player(West)
        .hand
        .contains("♠K".parse().unwrap()));

    // Returns must be rank <= 10 and flow along the rebound pairs.
    assert!(engine
        .give_return_tribute(East, South, "♠A".parse().unwrap())
        .is_err());
    engine
        .give_return_tribute(East, South, "♦2".parse().unwrap())
        .unwrap();
    engine
        .give_return_tribute(West, North, "♥6".parse().unwrap())
        .unwrap();

    assert_eq!(engine.phase(), DealPhase::FirstPlay);
    assert_eq!(engine.deal().unwrap().tribute.phase, TributePhase::Completed);

    // The receiver of the larger tribute (the big joker went to East) leads.
    assert_eq!(engine.current_player(), Some(East));

    // Card conservation across the whole exchange (rigged 5-card hands).
    let total: usize = Seat::ALL
        .iter()
        .map(|s| engine.match_ctx().player(*s).hand.len())
        .sum();
    assert_eq!(total, 20);
}

/// S4 — Single-Last immunity: no tribute happens, 1st leads.
#[test]
fn s4_single_last_immunity() {
    let mut engine = test_engine(47);
    engine.set_last_rankings_for_test([East, South, West, North]);
    engine.start_deal(2, East).unwrap();
    engine.deal_cards().unwrap();
    engine.determine_trump().unwrap();

    engine.set_hand_for_test(North, cards(&["BJ", "BJ", "♦4", "♣5", "♠6"]));

    let events = engine.start_tribute().unwrap();
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::TributeGiven { .. } | GameEvent::TributeRequested { .. })));

    let deal = engine.deal().unwrap();
    assert_eq!(deal.tribute.scenario, TributeScenario::SingleLast);
    assert!(deal.tribute.has_immunity);
    assert_eq!(deal.tribute.phase, TributePhase::Completed);
    assert_eq!(deal.phase, DealPhase::FirstPlay);
    assert_eq!(engine.current_player(), Some(East));
}

/// Single-Last without immunity: 4th pays 1st and leads the deal.
#[test]
fn single_last_tribute_flow_and_opener() {
    let mut engine = test_engine(53);
    engine.set_last_rankings_for_test([East, South, West, North]);
    engine.start_deal(2, East).unwrap();
    engine.deal_cards().unwrap();
    engine.determine_trump().unwrap();

    engine.set_hand_for_test(North, cards(&["♠A", "♥9", "♦4", "♣5", "♠6"]));
    engine.set_hand_for_test(East, cards(&["♠K", "♥2", "♦6", "♣7", "♠8"]));

    engine.start_tribute().unwrap();
    assert_eq!(engine.phase(), DealPhase::Tribute);

    engine.give_tribute(North, East, "♠A".parse().unwrap()).unwrap();
    assert_eq!(engine.phase(), DealPhase::ReturnTribute);
    engine
        .give_return_tribute(East, North, "♥2".parse().unwrap())
        .unwrap();

    assert_eq!(engine.phase(), DealPhase::FirstPlay);
    assert_eq!(engine.current_player(), Some(North), "4th leads");
    assert!(engine.match_ctx().player(East).hand.contains("♠A".parse().unwrap()));
    assert!(engine.match_ctx().player(North).hand.contains("♥2".parse().unwrap()));
}

/// Hand conservation through an untouched full deal start and trick play.
#[test]
fn conservation_holds_through_real_play() {
    let mut engine = engine_at_first_play(90210);
    assert_eq!(cards_in_play(&engine), DECK_SIZE);

    // Play a handful of turns using the engine's own legal-play listing.
    for _ in 0..12 {
        let Some(seat) = engine.current_player() else { break };
        let plays = engine.legal_plays_for(seat);
        match plays.into_iter().next() {
            Some(play) => {
                engine.play_cards(seat, play.cards).unwrap();
            }
            None => {
                engine.pass(seat).unwrap();
            }
        }
        assert_eq!(cards_in_play(&engine), DECK_SIZE);
    }
}
