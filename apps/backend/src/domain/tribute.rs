//! The tribute protocol: scenario classification, immunity, card rules and
//! the Double-Down selection sub-protocol.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Rank, Suit};
use super::compare::card_value;
use super::state::{Seat, PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

/// Highest rank a return-tribute card may carry.
pub const RETURN_MAX_RANK: u8 = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TributeScenario {
    None,
    /// Winning team swept 1st and 2nd.
    DoubleDown,
    /// Only 4th is on the fully-losing side.
    SingleLast,
    /// Only 3rd is on the fully-losing side.
    PartnerLast,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TributePhase {
    Idle,
    Requested,
    Giving,
    Selection,
    Returning,
    Completed,
}

/// Tribute bookkeeping for one deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TributeInfo {
    pub scenario: TributeScenario,
    pub has_immunity: bool,
    pub phase: TributePhase,
    /// Outstanding tribute obligations, giver → receiver.
    pub tribute_requests: BTreeMap<Seat, Seat>,
    /// Return obligations, giver → receiver (rebound after Selection).
    pub return_requests: BTreeMap<Seat, Seat>,
    /// Cards surrendered so far, giver → card.
    pub given_tributes: BTreeMap<Seat, Card>,
    /// Cards returned so far, giver → card.
    pub returned_tributes: BTreeMap<Seat, Card>,
    /// Double-Down pool: tributes awaiting selection, giver → card.
    pub available_cards: BTreeMap<Seat, Card>,
    /// Selection outcome, receiver → card taken.
    pub selected_cards: BTreeMap<Seat, Card>,
    /// Where each tribute actually went, giver → receiver.
    pub actual_receivers: BTreeMap<Seat, Seat>,
}

impl Default for TributeInfo {
    fn default() -> Self {
        Self {
            scenario: TributeScenario::None,
            has_immunity: false,
            phase: TributePhase::Idle,
            tribute_requests: BTreeMap::new(),
            return_requests: BTreeMap::new(),
            given_tributes: BTreeMap::new(),
            returned_tributes: BTreeMap::new(),
            available_cards: BTreeMap::new(),
            selected_cards: BTreeMap::new(),
            actual_receivers: BTreeMap::new(),
        }
    }
}

impl TributeInfo {
    /// Initialize from the previous deal's finish order and the big-joker
    /// counts of the dealt hands. Immune scenarios jump straight to
    /// Completed.
    pub fn initialize(rankings: Option<[Seat; PLAYERS]>, big_jokers: &BTreeMap<Seat, usize>) -> Self {
        let mut info = TributeInfo::default();

        let Some(rankings) = rankings else {
            info.phase = TributePhase::Completed;
            return info;
        };

        info.scenario = classify_scenario(&rankings);
        info.has_immunity = has_immunity(info.scenario, &rankings, big_jokers);

        if info.scenario == TributeScenario::None || info.has_immunity {
            info.phase = TributePhase::Completed;
            return info;
        }

        let [first, second, third, fourth] = rankings;
        match info.scenario {
            TributeScenario::DoubleDown => {
                info.tribute_requests.insert(third, first);
                info.tribute_requests.insert(fourth, second);
                info.return_requests.insert(first, third);
                info.return_requests.insert(second, fourth);
            }
            TributeScenario::SingleLast => {
                info.tribute_requests.insert(fourth, first);
                info.return_requests.insert(first, fourth);
            }
            TributeScenario::PartnerLast => {
                info.tribute_requests.insert(third, first);
                info.return_requests.insert(first, third);
            }
            TributeScenario::None => unreachable!(),
        }
        info.phase = TributePhase::Requested;
        info
    }

    pub fn is_completed(&self) -> bool {
        self.phase == TributePhase::Completed
    }

    pub fn all_tributes_given(&self) -> bool {
        !self.tribute_requests.is_empty()
            && self.given_tributes.len() == self.tribute_requests.len()
    }

    pub fn all_returns_given(&self) -> bool {
        self.returned_tributes.len() == self.return_requests.len()
    }
}

/// Scenario from `[1st, 2nd, 3rd, 4th]`, by team composition.
pub fn classify_scenario(rankings: &[Seat; PLAYERS]) -> TributeScenario {
    let [first, second, third, fourth] = rankings;
    if first.team() == second.team() {
        TributeScenario::DoubleDown
    } else if first.team() == third.team() {
        TributeScenario::SingleLast
    } else if first.team() == fourth.team() {
        TributeScenario::PartnerLast
    } else {
        // Four seats, two teams: one of the three cases always holds.
        TributeScenario::None
    }
}

/// Immunity: the losing side collectively holds enough BigJokers.
pub fn has_immunity(
    scenario: TributeScenario,
    rankings: &[Seat; PLAYERS],
    big_jokers: &BTreeMap<Seat, usize>,
) -> bool {
    let count = |seat: Seat| big_jokers.get(&seat).copied().unwrap_or(0);
    let [_, _, third, fourth] = rankings;
    match scenario {
        TributeScenario::None => false,
        TributeScenario::DoubleDown => count(*third) + count(*fourth) >= 2,
        TributeScenario::SingleLast => count(*fourth) >= 2,
        TributeScenario::PartnerLast => count(*third) >= 2,
    }
}

/// The card a giver must surrender: their highest card under trump-aware
/// ordering, excluding Hearts of the trump rank. Errors when nothing but
/// Hearts-of-trump would qualify.
pub fn required_tribute_card(hand: &[Card], trump: Rank) -> Result<Card, DomainError> {
    hand.iter()
        .copied()
        .filter(|c| !(c.rank == trump && c.suit == Suit::Hearts))
        .max_by_key(|c| card_value(*c, trump))
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::TributeCard,
                "No eligible tribute card outside Hearts of the trump rank",
            )
        })
}

/// Validate a proposed tribute card: it must tie the required card's value
/// (two physical copies of the top card are interchangeable).
pub fn validate_tribute_card(hand: &[Card], card: Card, trump: Rank) -> Result<(), DomainError> {
    if card.rank == trump && card.suit == Suit::Hearts {
        return Err(DomainError::validation(
            ValidationKind::TributeCard,
            "Hearts of the trump rank may not be paid as tribute",
        ));
    }
    let required = required_tribute_card(hand, trump)?;
    if card_value(card, trump) != card_value(required, trump) {
        return Err(DomainError::validation(
            ValidationKind::TributeCard,
            format!("Tribute must be the highest eligible card ({required})"),
        ));
    }
    Ok(())
}

/// Validate a return-tribute card: non-joker, rank <= 10.
pub fn validate_return_card(card: Card) -> Result<(), DomainError> {
    if card.is_joker() || card.rank.numeric() > RETURN_MAX_RANK {
        return Err(DomainError::validation(
            ValidationKind::ReturnCard,
            format!("Return tribute must be a non-joker card of rank 10 or below, got {card}"),
        ));
    }
    Ok(())
}
