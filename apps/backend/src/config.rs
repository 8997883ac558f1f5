//! Environment-driven configuration.
//!
//! Everything is injected at construction time; there are no process-wide
//! registries. Environment variables must be set by the runtime environment
//! (Docker env files, or sourced manually for local dev).

use std::env;
use std::time::Duration;

use crate::bus::BusConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_PING_INTERVAL_SECS: u64 = 20;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
const DEFAULT_IDLE_CHECK_SECS: u64 = 30;

/// Per-room behavior knobs, cloned into every kernel.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    pub ping_interval: Duration,
    pub idle_timeout: Duration,
    pub idle_check_interval: Duration,
    /// Fixed match seed; None derives one from the clock per match.
    pub seed: Option<u64>,
    pub deal_limit: Option<u32>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            ping_interval: Duration::from_secs(DEFAULT_PING_INTERVAL_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            idle_check_interval: Duration::from_secs(DEFAULT_IDLE_CHECK_SECS),
            seed: None,
            deal_limit: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub room: RoomConfig,
    pub bus: BusConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env::var("GUANDAN_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env_parsed("GUANDAN_PORT").unwrap_or(DEFAULT_PORT);

        let room = RoomConfig {
            ping_interval: Duration::from_secs(
                env_parsed("GUANDAN_PING_INTERVAL_SECS").unwrap_or(DEFAULT_PING_INTERVAL_SECS),
            ),
            idle_timeout: Duration::from_secs(
                env_parsed("GUANDAN_IDLE_TIMEOUT_SECS").unwrap_or(DEFAULT_IDLE_TIMEOUT_SECS),
            ),
            idle_check_interval: Duration::from_secs(
                env_parsed("GUANDAN_IDLE_CHECK_SECS").unwrap_or(DEFAULT_IDLE_CHECK_SECS),
            ),
            seed: env_parsed("GUANDAN_MATCH_SEED"),
            deal_limit: env_parsed("GUANDAN_DEAL_LIMIT"),
        };

        let mut bus = BusConfig::default();
        if let Some(capacity) = env_parsed("GUANDAN_EVENT_QUEUE_CAPACITY") {
            bus.queue_capacity = capacity;
        }
        if let Some(capacity) = env_parsed("GUANDAN_SUBSCRIBER_CAPACITY") {
            bus.subscriber_capacity = capacity;
        }

        Self {
            host,
            port,
            room,
            bus,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
