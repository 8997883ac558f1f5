//! Client-facing snapshot of a match.
//!
//! Produces a serializable view of the engine state for new and
//! reconnecting players. Never panics; inconsistent states degrade to safe
//! defaults. `player_hands` currently exposes every seat's hand, matching
//! the reference behavior; per-recipient tailoring would happen here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cards_types::{Card, Rank};
use super::contexts::{DealPhase, MatchState};
use super::engine::GameEngine;
use super::state::Seat;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPublic {
    pub id: Uuid,
    pub name: String,
    pub seat: Seat,
    pub hand_count: usize,
    pub level: Rank,
    pub connected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPublic {
    pub deal_id: u32,
    pub trump: Rank,
    pub phase: DealPhase,
    pub current_turn: Option<Seat>,
    pub table_play: Option<Vec<Card>>,
    pub last_player: Option<Seat>,
    pub player_hands: BTreeMap<Seat, Vec<Card>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub match_id: Uuid,
    pub players: Vec<PlayerPublic>,
    pub status: MatchState,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_deal: Option<DealPublic>,
}

/// Build a snapshot from the engine state. The version is stamped by the
/// room kernel at capture time.
pub fn snapshot(engine: &GameEngine, version: u64) -> MatchSnapshot {
    let ctx = engine.match_ctx();

    let players = Seat::ALL
        .into_iter()
        .map(|seat| {
            let p = ctx.player(seat);
            PlayerPublic {
                id: p.id,
                name: p.name.clone(),
                seat,
                hand_count: p.hand.len(),
                level: p.level,
                connected: p.connected,
            }
        })
        .collect();

    let current_deal = engine.deal().map(|deal| {
        let mut player_hands = BTreeMap::new();
        for seat in Seat::ALL {
            player_hands.insert(seat, ctx.player(seat).hand.sorted());
        }
        DealPublic {
            deal_id: deal.deal_number,
            trump: deal.trump,
            phase: deal.phase,
            current_turn: engine.current_player(),
            table_play: engine
                .trick()
                .and_then(|t| t.last_play.as_ref())
                .map(|g| g.cards.clone()),
            last_player: engine.trick().and_then(|t| t.last_player),
            player_hands,
        }
    });

    MatchSnapshot {
        match_id: ctx.match_id,
        players,
        status: ctx.state,
        version,
        current_deal,
    }
}
