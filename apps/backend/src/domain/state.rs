//! Seats, teams, players and seat math.
//!
//! These live in `domain` so every layer (engine, services, room kernel,
//! snapshots) shares a single source of truth for rotation and "who acts
//! next".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::hand::Hand;
use crate::domain::Rank;
use crate::errors::domain::{DomainError, ValidationKind};

pub const PLAYERS: usize = 4;

/// The four fixed seats, clockwise. On the wire a seat is its index 0..=3.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Seat {
    East,
    South,
    West,
    North,
}

impl Seat {
    pub const ALL: [Seat; PLAYERS] = [Seat::East, Seat::South, Seat::West, Seat::North];

    pub fn index(self) -> usize {
        match self {
            Seat::East => 0,
            Seat::South => 1,
            Seat::West => 2,
            Seat::North => 3,
        }
    }

    pub fn from_index(index: usize) -> Result<Seat, DomainError> {
        Seat::ALL.get(index).copied().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidSeat,
                format!("Seat index out of range: {index}"),
            )
        })
    }

    /// Next seat clockwise (East → South → West → North → East).
    pub fn next(self) -> Seat {
        Seat::ALL[(self.index() + 1) % PLAYERS]
    }

    /// The seat `n` steps clockwise from `self`.
    pub fn nth_next(self, n: usize) -> Seat {
        Seat::ALL[(self.index() + n) % PLAYERS]
    }

    /// Partner sits opposite.
    pub fn partner(self) -> Seat {
        self.nth_next(2)
    }

    pub fn team(self) -> Team {
        match self {
            Seat::East | Seat::West => Team::EastWest,
            Seat::South | Seat::North => Team::SouthNorth,
        }
    }
}

impl Serialize for Seat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.index() as u8)
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = u8::deserialize(deserializer)?;
        Seat::from_index(v as usize).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// The two partnerships.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Team {
    EastWest,
    SouthNorth,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::EastWest, Team::SouthNorth];

    pub fn index(self) -> usize {
        match self {
            Team::EastWest => 0,
            Team::SouthNorth => 1,
        }
    }

    pub fn seats(self) -> [Seat; 2] {
        match self {
            Team::EastWest => [Seat::East, Seat::West],
            Team::SouthNorth => [Seat::South, Seat::North],
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::EastWest => Team::SouthNorth,
            Team::SouthNorth => Team::EastWest,
        }
    }
}

/// A seated player and their hand. Hands are true multisets: two physical
/// decks mean duplicates are normal.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub seat: Seat,
    pub level: Rank,
    pub hand: Hand,
    pub connected: bool,
}

impl Player {
    pub fn new(id: Uuid, name: impl Into<String>, seat: Seat) -> Self {
        Self {
            id,
            name: name.into(),
            seat,
            level: Rank::Two,
            hand: Hand::default(),
            connected: true,
        }
    }

    pub fn team(&self) -> Team {
        self.seat.team()
    }
}
