//! Match / deal / trick contexts.
//!
//! These are mutable values owned exclusively by the engine; all access is
//! serialized by the room kernel's single-writer discipline, so no interior
//! locking lives here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::cards_types::{Card, Rank};
use super::combos::CardGroup;
use super::state::{Player, Seat, Team, PLAYERS};
use super::tribute::TributeInfo;
use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchState {
    Created,
    InProgress,
    Finished,
}

/// One match: four players, two team levels, a deal counter.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub match_id: Uuid,
    pub state: MatchState,
    pub players: [Player; PLAYERS],
    /// Current level per team, indexed by `Team::index()`. Both start at Two.
    pub team_levels: [Rank; 2],
    pub start_time: OffsetDateTime,
    pub end_time: Option<OffsetDateTime>,
    pub current_deal_number: u32,
    pub max_deals: u32,
    pub winner_team: Option<Team>,
    pub seed: u64,
}

impl MatchContext {
    pub fn new(match_id: Uuid, players: [Player; PLAYERS], max_deals: u32, seed: u64) -> Self {
        Self {
            match_id,
            state: MatchState::Created,
            players,
            team_levels: [Rank::Two, Rank::Two],
            start_time: OffsetDateTime::now_utc(),
            end_time: None,
            current_deal_number: 0,
            max_deals,
            winner_team: None,
            seed,
        }
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn team_level(&self, team: Team) -> Rank {
        self.team_levels[team.index()]
    }

    pub fn set_team_level(&mut self, team: Team, level: Rank) {
        self.team_levels[team.index()] = level;
        for seat in team.seats() {
            self.player_mut(seat).level = level;
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DealPhase {
    Idle,
    Created,
    CardsDealt,
    TrumpDecision,
    Tribute,
    TributeSelection,
    ReturnTribute,
    FirstPlay,
    InProgress,
    RankList,
    Finished,
}

/// Per-deal state: trump, finish order, tribute bookkeeping.
#[derive(Debug, Clone)]
pub struct DealContext {
    pub deal_number: u32,
    pub phase: DealPhase,
    pub trump: Rank,
    pub current_level: Rank,
    /// Tentative first player recorded at StartDeal; the definitive opener
    /// is fixed when the deal reaches FirstPlay.
    pub first_player: Seat,
    /// Finish order of this deal (at most 3 entries; the 4th is implicit).
    pub rank_list: Vec<Seat>,
    pub trick_count: u32,
    pub is_first_deal: bool,
    /// Full finish order of the previous deal, when one exists.
    pub last_rankings: Option<[Seat; PLAYERS]>,
    /// First-deal starting card and its holder.
    pub starting_card: Option<(Card, Seat)>,
    /// Cards played and out of round (completed tricks).
    pub discard: Vec<Card>,
    pub tribute: TributeInfo,
}

impl DealContext {
    pub fn new(deal_number: u32, first_player: Seat, last_rankings: Option<[Seat; PLAYERS]>) -> Self {
        Self {
            deal_number,
            phase: DealPhase::Created,
            trump: Rank::Two,
            current_level: Rank::Two,
            first_player,
            rank_list: Vec::with_capacity(PLAYERS),
            trick_count: 0,
            is_first_deal: deal_number == 1,
            last_rankings,
            starting_card: None,
            discard: Vec::new(),
            tribute: TributeInfo::default(),
        }
    }

    pub fn has_finished(&self, seat: Seat) -> bool {
        self.rank_list.contains(&seat)
    }

    /// The seat that has not finished once three players have.
    pub fn implicit_last(&self) -> Option<Seat> {
        if self.rank_list.len() < PLAYERS - 1 {
            return None;
        }
        Seat::ALL.iter().copied().find(|s| !self.rank_list.contains(s))
    }

    pub fn full_rankings(&self) -> Option<[Seat; PLAYERS]> {
        let last = self.implicit_last()?;
        let mut order = [Seat::East; PLAYERS];
        for (i, &s) in self.rank_list.iter().take(3).enumerate() {
            order[i] = s;
        }
        order[3] = last;
        Some(order)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrickState {
    Active,
    Finished,
}

/// One trick: the table play, pass set and play history.
#[derive(Debug, Clone)]
pub struct TrickContext {
    pub trick_number: u32,
    pub state: TrickState,
    pub start_player: Seat,
    pub current_player: Seat,
    pub last_play: Option<CardGroup>,
    pub last_player: Option<Seat>,
    pub passed: BTreeSet<Seat>,
    pub history: Vec<(Seat, CardGroup)>,
    pub winner: Option<Seat>,
}

impl TrickContext {
    pub fn new(trick_number: u32, start_player: Seat) -> Self {
        Self {
            trick_number,
            state: TrickState::Active,
            start_player,
            current_player: start_player,
            last_play: None,
            last_player: None,
            passed: BTreeSet::new(),
            history: Vec::new(),
            winner: None,
        }
    }
}

pub fn require_deal<'a>(
    deal: &'a Option<DealContext>,
    ctx: &'static str,
) -> Result<&'a DealContext, DomainError> {
    deal.as_ref()
        .ok_or_else(|| DomainError::invariant(format!("deal context must be set ({ctx})")))
}

pub fn require_trick<'a>(
    trick: &'a Option<TrickContext>,
    ctx: &'static str,
) -> Result<&'a TrickContext, DomainError> {
    trick
        .as_ref()
        .ok_or_else(|| DomainError::invariant(format!("trick context must be set ({ctx})")))
}
