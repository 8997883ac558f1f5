//! Domain events: the closed vocabulary broadcast to clients.
//!
//! Serialized adjacently tagged (`e` / `data`) so the room kernel can wrap
//! an event as `{t:"Event", e:..., data:..., version}` by flattening.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cards_types::{Card, Rank};
use super::combos::Category;
use super::state::{Seat, Team};
use super::tribute::TributeScenario;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "e", content = "data")]
pub enum GameEvent {
    MatchCreated {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        players: Vec<(Seat, String)>,
    },
    DealStarted {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        #[serde(rename = "dealNumber")]
        deal_number: u32,
        #[serde(rename = "firstPlayer")]
        first_player: Seat,
    },
    CardsDealt {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        #[serde(rename = "dealNumber")]
        deal_number: u32,
        hands: BTreeMap<Seat, Vec<Card>>,
    },
    TrumpDetermined {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        trump: Rank,
    },
    TributeRequested {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        scenario: TributeScenario,
        /// Outstanding obligations, giver → receiver.
        requests: BTreeMap<Seat, Seat>,
    },
    TributeGiven {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        from: Seat,
        to: Seat,
        card: Card,
    },
    TributeSelectionRequested {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        chooser: Seat,
        pool: BTreeMap<Seat, Card>,
    },
    TributeCardSelected {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        chooser: Seat,
        giver: Seat,
        card: Card,
    },
    CardsPlayed {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        seat: Seat,
        cards: Vec<Card>,
        category: Category,
    },
    PlayerPassed {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        seat: Seat,
    },
    TrickWon {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        winner: Seat,
        #[serde(rename = "trickNumber")]
        trick_number: u32,
    },
    PlayerFinished {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        seat: Seat,
        /// 1-based finishing position.
        position: usize,
    },
    DealEnded {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        #[serde(rename = "dealNumber")]
        deal_number: u32,
        #[serde(rename = "rankList")]
        rank_list: Vec<Seat>,
        #[serde(rename = "winnerTeam")]
        winner_team: Team,
    },
    MatchEnded {
        #[serde(rename = "matchId")]
        match_id: Uuid,
        #[serde(rename = "winnerTeam")]
        winner_team: Team,
        /// 1 for the winner, 0 for the opponent.
        score: BTreeMap<Team, u8>,
    },
}

impl GameEvent {
    pub fn match_id(&self) -> Uuid {
        match self {
            GameEvent::MatchCreated { match_id, .. }
            | GameEvent::DealStarted { match_id, .. }
            | GameEvent::CardsDealt { match_id, .. }
            | GameEvent::TrumpDetermined { match_id, .. }
            | GameEvent::TributeRequested { match_id, .. }
            | GameEvent::TributeGiven { match_id, .. }
            | GameEvent::TributeSelectionRequested { match_id, .. }
            | GameEvent::TributeCardSelected { match_id, .. }
            | GameEvent::CardsPlayed { match_id, .. }
            | GameEvent::PlayerPassed { match_id, .. }
            | GameEvent::TrickWon { match_id, .. }
            | GameEvent::PlayerFinished { match_id, .. }
            | GameEvent::DealEnded { match_id, .. }
            | GameEvent::MatchEnded { match_id, .. } => *match_id,
        }
    }

    /// The wire name of the event type.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::MatchCreated { .. } => "MatchCreated",
            GameEvent::DealStarted { .. } => "DealStarted",
            GameEvent::CardsDealt { .. } => "CardsDealt",
            GameEvent::TrumpDetermined { .. } => "TrumpDetermined",
            GameEvent::TributeRequested { .. } => "TributeRequested",
            GameEvent::TributeGiven { .. } => "TributeGiven",
            GameEvent::TributeSelectionRequested { .. } => "TributeSelectionRequested",
            GameEvent::TributeCardSelected { .. } => "TributeCardSelected",
            GameEvent::CardsPlayed { .. } => "CardsPlayed",
            GameEvent::PlayerPassed { .. } => "PlayerPassed",
            GameEvent::TrickWon { .. } => "TrickWon",
            GameEvent::PlayerFinished { .. } => "PlayerFinished",
            GameEvent::DealEnded { .. } => "DealEnded",
            GameEvent::MatchEnded { .. } => "MatchEnded",
        }
    }
}
