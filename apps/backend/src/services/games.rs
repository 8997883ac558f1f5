//! Game service: the per-process registry of running matches.
//!
//! Wraps the engine behind a request API. The registry-wide lock guards map
//! mutation only; engine calls run under the per-match mutex while the room
//! kernel additionally serializes all callers of one match, so the engine
//! sees strictly ordered operations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use time::OffsetDateTime;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info};
use uuid::Uuid;

use crate::bus::{EventBus, SubscriptionGuard};
use crate::domain::contexts::MatchState;
use crate::domain::engine::GameEngine;
use crate::domain::snapshot::{snapshot, MatchSnapshot};
use crate::domain::{Card, CardGroup, GameEvent, MatchContext, Player, Seat, PLAYERS};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

pub const DEFAULT_DEAL_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct PlayerSpec {
    pub id: Uuid,
    pub name: String,
    pub seat: Seat,
}

#[derive(Debug, Clone, Default)]
pub struct CreateMatchOptions {
    pub deal_limit: Option<u32>,
    pub seed: Option<u64>,
}

pub struct MatchInstance {
    pub match_id: Uuid,
    engine: Mutex<GameEngine>,
    pub created_at: OffsetDateTime,
    updated_at: Mutex<OffsetDateTime>,
    active: AtomicBool,
}

impl MatchInstance {
    pub fn updated_at(&self) -> OffsetDateTime {
        *self.updated_at.lock()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

pub struct GameService {
    bus: Arc<EventBus>,
    instances: RwLock<HashMap<Uuid, Arc<MatchInstance>>>,
}

impl GameService {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Create a match for exactly four players, one per seat.
    pub fn create_match(
        &self,
        players: Vec<PlayerSpec>,
        options: CreateMatchOptions,
    ) -> Result<Uuid, DomainError> {
        if players.len() != PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("A match needs exactly 4 players, got {}", players.len()),
            ));
        }
        let mut by_seat: [Option<Player>; PLAYERS] = Default::default();
        for spec in players {
            let slot = &mut by_seat[spec.seat.index()];
            if slot.is_some() {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSeat,
                    format!("Seat {:?} specified twice", spec.seat),
                ));
            }
            *slot = Some(Player::new(spec.id, spec.name, spec.seat));
        }
        let seated: Vec<Player> = by_seat.into_iter().flatten().collect();
        let seated: [Player; PLAYERS] = seated.try_into().map_err(|_| {
            DomainError::validation(ValidationKind::InvalidSeat, "Every seat must be filled")
        })?;

        let match_id = Uuid::new_v4();
        let seed = options.seed.unwrap_or_else(time_seed);
        let deal_limit = options.deal_limit.unwrap_or(DEFAULT_DEAL_LIMIT);
        let player_names: Vec<(Seat, String)> = seated
            .iter()
            .map(|p| (p.seat, p.name.clone()))
            .collect();

        let ctx = MatchContext::new(match_id, seated, deal_limit, seed);
        let instance = Arc::new(MatchInstance {
            match_id,
            engine: Mutex::new(GameEngine::new(ctx)),
            created_at: OffsetDateTime::now_utc(),
            updated_at: Mutex::new(OffsetDateTime::now_utc()),
            active: AtomicBool::new(true),
        });
        self.instances.write().insert(match_id, instance);

        info!(%match_id, seed, "match created");
        self.bus.publish(GameEvent::MatchCreated {
            match_id,
            players: player_names,
        });
        Ok(match_id)
    }

    /// Drive the next deal through StartDeal → DealCards → DetermineTrump →
    /// StartTribute. The tentative first player is last deal's winner; the
    /// engine fixes the definitive opener when tribute resolves.
    pub fn start_next_deal(&self, match_id: Uuid) -> Result<(), DomainError> {
        self.with_engine(match_id, |engine| {
            let deal_number = engine.match_ctx().current_deal_number + 1;
            let first_player = engine
                .last_rankings()
                .map(|r| r[0])
                .unwrap_or(Seat::East);

            let mut events = engine.start_deal(deal_number, first_player)?;
            events.extend(engine.deal_cards()?);
            events.extend(engine.determine_trump()?);
            events.extend(engine.start_tribute()?);
            Ok(events)
        })
    }

    pub fn play_cards(&self, match_id: Uuid, seat: Seat, cards: Vec<Card>) -> Result<(), DomainError> {
        self.with_engine(match_id, |engine| engine.play_cards(seat, cards))
    }

    pub fn pass(&self, match_id: Uuid, seat: Seat) -> Result<(), DomainError> {
        self.with_engine(match_id, |engine| engine.pass(seat))
    }

    pub fn give_tribute(
        &self,
        match_id: Uuid,
        from: Seat,
        to: Seat,
        card: Card,
    ) -> Result<(), DomainError> {
        self.with_engine(match_id, |engine| engine.give_tribute(from, to, card))
    }

    pub fn select_tribute_card(
        &self,
        match_id: Uuid,
        chooser: Seat,
        giver: Seat,
    ) -> Result<(), DomainError> {
        self.with_engine(match_id, |engine| engine.select_tribute_card(chooser, giver))
    }

    pub fn give_return_tribute(
        &self,
        match_id: Uuid,
        from: Seat,
        to: Seat,
        card: Card,
    ) -> Result<(), DomainError> {
        self.with_engine(match_id, |engine| engine.give_return_tribute(from, to, card))
    }

    /// Snapshot of the current state; `version` is stamped by the caller.
    pub fn snapshot(&self, match_id: Uuid, version: u64) -> Result<MatchSnapshot, DomainError> {
        let instance = self.require(match_id)?;
        let engine = instance.engine.lock();
        Ok(snapshot(&engine, version))
    }

    pub fn subscribe(
        &self,
        match_id: Uuid,
    ) -> Result<(ReceiverStream<GameEvent>, SubscriptionGuard), DomainError> {
        self.require(match_id)?;
        Ok(self.bus.subscribe(match_id))
    }

    pub fn subscribe_with_callback<F>(
        &self,
        match_id: Uuid,
        callback: F,
    ) -> Result<SubscriptionGuard, DomainError>
    where
        F: FnMut(GameEvent) + Send + 'static,
    {
        self.require(match_id)?;
        Ok(self.bus.subscribe_with_callback(match_id, callback))
    }

    pub fn valid_plays(&self, match_id: Uuid, seat: Seat) -> Result<Vec<CardGroup>, DomainError> {
        let instance = self.require(match_id)?;
        let engine = instance.engine.lock();
        Ok(engine.legal_plays_for(seat))
    }

    pub fn current_player(&self, match_id: Uuid) -> Result<Option<Seat>, DomainError> {
        let instance = self.require(match_id)?;
        let engine = instance.engine.lock();
        Ok(engine.current_player())
    }

    pub fn is_player_turn(&self, match_id: Uuid, seat: Seat) -> Result<bool, DomainError> {
        Ok(self.current_player(match_id)? == Some(seat))
    }

    pub fn match_state(&self, match_id: Uuid) -> Result<MatchState, DomainError> {
        let instance = self.require(match_id)?;
        let engine = instance.engine.lock();
        Ok(engine.match_ctx().state)
    }

    pub fn delete_match(&self, match_id: Uuid) -> Result<(), DomainError> {
        let instance = self
            .instances
            .write()
            .remove(&match_id)
            .ok_or_else(|| not_found(match_id))?;
        instance.active.store(false, Ordering::Relaxed);
        self.bus.clear_subscribers(match_id);
        debug!(%match_id, "match deleted");
        Ok(())
    }

    fn require(&self, match_id: Uuid) -> Result<Arc<MatchInstance>, DomainError> {
        self.instances
            .read()
            .get(&match_id)
            .cloned()
            .ok_or_else(|| not_found(match_id))
    }

    /// Run an engine operation and publish its events in order. The
    /// per-instance mutex keeps engine access serialized; event publication
    /// happens while still inside the caller's room-level exclusion, which
    /// preserves per-match ordering.
    fn with_engine<F>(&self, match_id: Uuid, op: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut GameEngine) -> Result<Vec<GameEvent>, DomainError>,
    {
        let instance = self.require(match_id)?;
        let mut engine = instance.engine.lock();
        let events = op(&mut engine)?;
        *instance.updated_at.lock() = OffsetDateTime::now_utc();
        for event in events {
            self.bus.publish(event);
        }
        Ok(())
    }
}

fn not_found(match_id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
}

fn time_seed() -> u64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as u64
}
