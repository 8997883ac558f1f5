//! WebSocket frame vocabulary. All frames are JSON objects tagged by `t`.

use serde::{Deserialize, Serialize};

use crate::domain::{GameEvent, Seat};
use crate::room::kernel::RoomSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayCardsData {
    pub cards: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TributeData {
    pub to: Seat,
    pub card: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectTributeData {
    pub giver: Seat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum ClientMsg {
    PlayCards { data: PlayCardsData },
    Pass,
    GiveTribute { data: TributeData },
    ReturnTribute { data: TributeData },
    SelectTribute { data: SelectTributeData },
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum ServerMsg {
    Snapshot {
        version: u64,
        payload: RoomSnapshot,
    },
    Event {
        #[serde(flatten)]
        event: GameEvent,
        version: u64,
    },
    Error {
        error: String,
    },
    #[serde(rename = "ping")]
    Ping,
}
