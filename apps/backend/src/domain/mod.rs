//! Domain layer: pure game logic, no I/O.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod combos;
pub mod compare;
pub mod contexts;
pub mod deck;
pub mod engine;
pub mod events;
pub mod hand;
pub mod plays;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod tribute;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_combos;
#[cfg(test)]
mod tests_integration;
#[cfg(test)]
mod tests_plays;
#[cfg(test)]
mod tests_props_combos;
#[cfg(test)]
mod tests_props_compare;
#[cfg(test)]
mod tests_tribute;

// Re-exports for ergonomics
pub use cards_parsing::try_parse_cards;
pub use cards_types::{Card, Rank, Suit};
pub use combos::{CardGroup, Category};
pub use compare::{can_beat, can_follow, card_value, compare_cards, compare_groups};
pub use contexts::{DealContext, DealPhase, MatchContext, MatchState, TrickContext};
pub use deck::Deck;
pub use engine::GameEngine;
pub use events::GameEvent;
pub use hand::Hand;
pub use plays::legal_plays;
pub use state::{Player, Seat, Team, PLAYERS};
pub use tribute::{TributeInfo, TributePhase, TributeScenario};
