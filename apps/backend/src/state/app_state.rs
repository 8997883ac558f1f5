//! Shared application state, built once at startup and injected everywhere.

use std::sync::Arc;

use crate::bus::EventBus;
use crate::config::ServerConfig;
use crate::room::RoomManager;
use crate::services::GameService;

pub struct AppState {
    pub config: ServerConfig,
    pub bus: Arc<EventBus>,
    pub games: Arc<GameService>,
    pub rooms: RoomManager,
}

impl AppState {
    /// Wire up the bus, game service and room registry. Must run inside a
    /// tokio runtime (the bus starts its dispatcher task).
    pub fn new(config: ServerConfig) -> Self {
        let bus = EventBus::start(config.bus);
        let games = Arc::new(GameService::new(Arc::clone(&bus)));
        let rooms = RoomManager::new(Arc::clone(&games), config.room.clone());
        Self {
            config,
            bus,
            games,
            rooms,
        }
    }
}
