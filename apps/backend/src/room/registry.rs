//! Registry of live rooms.

use std::sync::Arc;

use dashmap::DashMap;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;

use super::kernel::RoomKernel;
use crate::config::RoomConfig;
use crate::domain::PLAYERS;
use crate::services::GameService;

/// Generate a short URL-safe room id. Collisions are checked at insert.
fn new_room_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListEntry {
    pub room_id: String,
    pub player_count: usize,
    pub max_players: usize,
    pub is_empty: bool,
}

#[derive(Clone)]
pub struct RoomManager {
    rooms: Arc<DashMap<String, Arc<RoomKernel>>>,
    games: Arc<GameService>,
    config: RoomConfig,
}

impl RoomManager {
    pub fn new(games: Arc<GameService>, config: RoomConfig) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            games,
            config,
        }
    }

    pub fn create_room(&self, name: String) -> Arc<RoomKernel> {
        let room_id = loop {
            let id = new_room_id();
            if !self.rooms.contains_key(&id) {
                break id;
            }
        };
        let kernel = RoomKernel::new(
            room_id.clone(),
            name,
            self.config.clone(),
            Arc::clone(&self.games),
        );
        self.rooms.insert(room_id, Arc::clone(&kernel));
        kernel
    }

    pub fn get(&self, room_id: &str) -> Option<Arc<RoomKernel>> {
        let kernel = self.rooms.get(room_id).map(|r| Arc::clone(&r))?;
        if kernel.is_stopped() {
            // Lazily reap rooms stopped by the idle routine.
            self.rooms.remove(room_id);
            return None;
        }
        Some(kernel)
    }

    pub fn remove(&self, room_id: &str) {
        if let Some((_, kernel)) = self.rooms.remove(room_id) {
            kernel.stop();
        }
    }

    pub fn list(&self) -> Vec<RoomListEntry> {
        self.rooms
            .iter()
            .filter(|entry| !entry.value().is_stopped())
            .map(|entry| {
                let kernel = entry.value();
                RoomListEntry {
                    room_id: kernel.room_id.clone(),
                    player_count: kernel.player_count(),
                    max_players: PLAYERS,
                    is_empty: kernel.is_empty(),
                }
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.rooms.iter().filter(|e| !e.value().is_stopped()).count()
    }
}
