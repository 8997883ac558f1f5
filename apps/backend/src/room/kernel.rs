//! The room kernel: one per room, owning the four player connections, the
//! monotonic broadcast version and the match lifecycle.
//!
//! Every public method takes the room's single mutex before touching any of
//! {player map, game service, version counter}; the event-subscription
//! callback and the background ping/idle routines do the same, so the
//! engine sees strictly ordered operations for this match.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Instant;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::bus::SubscriptionGuard;
use crate::config::RoomConfig;
use crate::domain::snapshot::DealPublic;
use crate::domain::{try_parse_cards, GameEvent, MatchState, Rank, Seat, PLAYERS};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::services::{CreateMatchOptions, GameService, PlayerSpec};
use crate::ws::protocol::{ClientMsg, ServerMsg};

/// A connected player slot: seat, identity and the outbound frame channel.
pub struct PlayerConn {
    pub player_id: Uuid,
    pub name: String,
    pub seat: Seat,
    tx: mpsc::UnboundedSender<ServerMsg>,
    pub connected: bool,
}

struct RoomInner {
    match_id: Option<Uuid>,
    players: BTreeMap<Seat, PlayerConn>,
    version: u64,
    last_activity: Instant,
    subscription: Option<SubscriptionGuard>,
    stopped: bool,
}

pub struct RoomKernel {
    pub room_id: String,
    pub name: String,
    config: RoomConfig,
    games: Arc<GameService>,
    inner: Mutex<RoomInner>,
    cancel: CancellationToken,
}

impl RoomKernel {
    pub fn new(
        room_id: String,
        name: String,
        config: RoomConfig,
        games: Arc<GameService>,
    ) -> Arc<Self> {
        let kernel = Arc::new(Self {
            room_id,
            name,
            config,
            games,
            inner: Mutex::new(RoomInner {
                match_id: None,
                players: BTreeMap::new(),
                version: 0,
                last_activity: Instant::now(),
                subscription: None,
                stopped: false,
            }),
            cancel: CancellationToken::new(),
        });
        kernel.spawn_routines();
        kernel
    }

    pub fn player_count(&self) -> usize {
        self.inner.lock().players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player_count() == 0
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.lock().stopped
    }

    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }

    /// Whether `seat` is free to take.
    pub fn seat_available(&self, seat: Seat) -> bool {
        let inner = self.inner.lock();
        !inner.stopped && !inner.players.contains_key(&seat)
    }

    /// Seat a player. The fourth player triggers match creation, event
    /// subscription and the first deal. Every new player receives the
    /// current snapshot on their outbound channel.
    pub fn add_player(
        self: &Arc<Self>,
        player_id: Uuid,
        name: String,
        seat: Seat,
        tx: mpsc::UnboundedSender<ServerMsg>,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.lock();
        if inner.stopped {
            return Err(DomainError::not_found(
                NotFoundKind::Room,
                format!("Room {} is closed", self.room_id),
            ));
        }
        if inner.players.contains_key(&seat) {
            return Err(DomainError::conflict(
                ConflictKind::SeatTaken,
                format!("Seat {:?} is already taken", seat),
            ));
        }
        if inner.players.len() >= PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::RoomFull,
                "Room already has 4 players",
            ));
        }

        inner.players.insert(
            seat,
            PlayerConn {
                player_id,
                name,
                seat,
                tx,
                connected: true,
            },
        );
        inner.last_activity = Instant::now();
        info!(room_id = %self.room_id, ?seat, %player_id, "player joined");

        if inner.players.len() == PLAYERS && inner.match_id.is_none() {
            let specs: Vec<PlayerSpec> = inner
                .players
                .values()
                .map(|c| PlayerSpec {
                    id: c.player_id,
                    name: c.name.clone(),
                    seat: c.seat,
                })
                .collect();
            let match_id = self.games.create_match(
                specs,
                CreateMatchOptions {
                    deal_limit: self.config.deal_limit,
                    seed: self.config.seed,
                },
            )?;
            inner.match_id = Some(match_id);

            let weak = Arc::downgrade(self);
            let guard = self
                .games
                .subscribe_with_callback(match_id, move |event| {
                    if let Some(kernel) = Weak::upgrade(&weak) {
                        kernel.on_event(event);
                    }
                })?;
            inner.subscription = Some(guard);

            info!(room_id = %self.room_id, %match_id, "room full, starting first deal");
            self.games.start_next_deal(match_id)?;
        }

        // The channel is buffered, so the snapshot is delivered as soon as
        // the session starts consuming.
        let snapshot = self.snapshot_locked(&inner);
        let version = snapshot.version;
        if let Some(conn) = inner.players.get(&seat) {
            let _ = conn.tx.send(ServerMsg::Snapshot {
                version,
                payload: snapshot,
            });
        }
        Ok(())
    }

    /// Drop a seat. Never tears down an in-progress deal.
    pub fn remove_player(&self, seat: Seat) {
        let mut inner = self.inner.lock();
        if inner.players.remove(&seat).is_some() {
            inner.last_activity = Instant::now();
            info!(room_id = %self.room_id, ?seat, "player left");
        }
    }

    /// Single-entry serialization point for inbound player messages.
    /// Failures are reported back to the acting seat only.
    pub fn handle_message(&self, seat: Seat, msg: ClientMsg) {
        let mut inner = self.inner.lock();
        inner.last_activity = Instant::now();

        let result = self.dispatch(&inner, seat, msg);
        if let Err(err) = result {
            debug!(room_id = %self.room_id, ?seat, error = %err, "rejected player action");
            Self::send_to(&mut inner, seat, ServerMsg::Error {
                error: err.to_string(),
            });
        }
    }

    fn dispatch(&self, inner: &RoomInner, seat: Seat, msg: ClientMsg) -> Result<(), DomainError> {
        let match_id = inner.match_id.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, "The match has not started yet")
        })?;
        match msg {
            ClientMsg::PlayCards { data } => {
                let cards = try_parse_cards(&data.cards)?;
                self.games.play_cards(match_id, seat, cards)
            }
            ClientMsg::Pass => self.games.pass(match_id, seat),
            ClientMsg::GiveTribute { data } => {
                let card = data.card.parse()?;
                self.games.give_tribute(match_id, seat, data.to, card)
            }
            ClientMsg::ReturnTribute { data } => {
                let card = data.card.parse()?;
                self.games.give_return_tribute(match_id, seat, data.to, card)
            }
            ClientMsg::SelectTribute { data } => {
                self.games.select_tribute_card(match_id, seat, data.giver)
            }
        }
    }

    /// Event-subscription callback: bump the version and fan the event out
    /// to every connected player.
    fn on_event(&self, event: GameEvent) {
        let mut inner = self.inner.lock();
        inner.version += 1;
        let version = inner.version;
        let msg = ServerMsg::Event { event, version };
        Self::broadcast(&mut inner, msg);
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let inner = self.inner.lock();
        self.snapshot_locked(&inner)
    }

    fn snapshot_locked(&self, inner: &RoomInner) -> RoomSnapshot {
        let players: Vec<RoomPlayerPublic> = match inner.match_id {
            Some(match_id) => match self.games.snapshot(match_id, inner.version) {
                Ok(snap) => {
                    let mut players: Vec<RoomPlayerPublic> = snap
                        .players
                        .iter()
                        .map(|p| RoomPlayerPublic {
                            id: p.id,
                            name: p.name.clone(),
                            seat: p.seat,
                            hand_count: p.hand_count,
                            level: p.level,
                            connected: inner.players.contains_key(&p.seat),
                        })
                        .collect();
                    players.sort_by_key(|p| p.seat.index());
                    return RoomSnapshot {
                        room_id: self.room_id.clone(),
                        match_id: Some(match_id),
                        players,
                        status: status_of(snap.status),
                        version: inner.version,
                        current_deal: snap.current_deal,
                    };
                }
                Err(err) => {
                    error!(room_id = %self.room_id, error = %err, "snapshot for missing match");
                    Vec::new()
                }
            },
            None => inner
                .players
                .values()
                .map(|c| RoomPlayerPublic {
                    id: c.player_id,
                    name: c.name.clone(),
                    seat: c.seat,
                    hand_count: 0,
                    level: Rank::Two,
                    connected: c.connected,
                })
                .collect(),
        };
        RoomSnapshot {
            room_id: self.room_id.clone(),
            match_id: inner.match_id,
            players,
            status: RoomStatus::Waiting,
            version: inner.version,
            current_deal: None,
        }
    }

    /// Stop the room: cancel routines, close every connection, unsubscribe
    /// and delete the match.
    pub fn stop(&self) {
        self.cancel.cancel();
        let mut inner = self.inner.lock();
        if inner.stopped {
            return;
        }
        inner.stopped = true;
        inner.players.clear();
        inner.subscription = None;
        if let Some(match_id) = inner.match_id.take() {
            if let Err(err) = self.games.delete_match(match_id) {
                warn!(room_id = %self.room_id, error = %err, "failed to delete match on stop");
            }
        }
        info!(room_id = %self.room_id, "room stopped");
    }

    fn spawn_routines(self: &Arc<Self>) {
        let ping = Arc::downgrade(self);
        let cancel = self.cancel.clone();
        let ping_interval = self.config.ping_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(ping_interval);
            interval.tick().await; // first tick fires immediately
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let Some(kernel) = Weak::upgrade(&ping) else { break };
                        kernel.ping_all();
                    }
                }
            }
        });

        let idle = Arc::downgrade(self);
        let cancel = self.cancel.clone();
        let check_interval = self.config.idle_check_interval;
        let idle_timeout = self.config.idle_timeout;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(check_interval);
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let Some(kernel) = Weak::upgrade(&idle) else { break };
                        let idle_for = kernel.inner.lock().last_activity.elapsed();
                        if idle_for > idle_timeout {
                            info!(room_id = %kernel.room_id, ?idle_for, "room idle, stopping");
                            kernel.stop();
                            break;
                        }
                    }
                }
            }
        });
    }

    fn ping_all(&self) {
        let mut inner = self.inner.lock();
        Self::broadcast(&mut inner, ServerMsg::Ping);
    }

    fn broadcast(inner: &mut RoomInner, msg: ServerMsg) {
        for conn in inner.players.values_mut() {
            if !conn.connected {
                continue;
            }
            if conn.tx.send(msg.clone()).is_err() {
                warn!(?conn.seat, "outbound channel closed, marking disconnected");
                conn.connected = false;
            }
        }
    }

    fn send_to(inner: &mut RoomInner, seat: Seat, msg: ServerMsg) {
        if let Some(conn) = inner.players.get_mut(&seat) {
            if conn.tx.send(msg).is_err() {
                conn.connected = false;
            }
        }
    }
}

impl Drop for RoomKernel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoomStatus {
    Waiting,
    InProgress,
    Finished,
}

fn status_of(state: MatchState) -> RoomStatus {
    match state {
        MatchState::Created => RoomStatus::Waiting,
        MatchState::InProgress => RoomStatus::InProgress,
        MatchState::Finished => RoomStatus::Finished,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPlayerPublic {
    pub id: Uuid,
    pub name: String,
    pub seat: Seat,
    pub hand_count: usize,
    pub level: Rank,
    pub connected: bool,
}

/// Client-safe view of a room and its match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: String,
    pub match_id: Option<Uuid>,
    pub players: Vec<RoomPlayerPublic>,
    pub status: RoomStatus,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_deal: Option<DealPublic>,
}
