#![allow(missing_docs)]
//! serde types that mirror the state of a game, handed to the presentation layer
//! and used to load board fixtures
use crate::board::Fence;
use crate::types::{Direction, PlayerId, Role, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Struct that matches the `position` object of the wire representation, a cell coordinate
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub a: i32,
    pub b: i32,
}

impl Position {
    pub fn new(a: i32, b: i32) -> Self {
        Position { a, b }
    }

    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            a: self.a + v.a,
            b: self.b + v.b,
        }
    }

    pub fn sub_vec(&self, v: Vector) -> Position {
        Position {
            a: self.a - v.a,
            b: self.b - v.b,
        }
    }

    pub fn to_vector(&self) -> Vector {
        Vector {
            a: self.a,
            b: self.b,
        }
    }

    /// the direction from self to other if they are orthogonally adjacent
    pub fn direction_to(&self, other: &Position) -> Option<Direction> {
        Direction::from_vector(other.sub_vec(self.to_vector()).to_vector())
    }

    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        ((self.a - other.a).abs() + (self.b - other.b).abs()) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// A player as it appears on the wire
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub position: Position,
    pub goal: Direction,
    pub fences_left: u8,
    pub role: Role,
}

/// Root object describing a whole game. You probably want to do:
/// ```
/// # use quoridor_game_types::wire_representation::Snapshot;
/// # let body = br#"{"size":8,"current":0,"fences":[{"a":3,"b":3,"orientation":"horizontal"}],"players":[{"position":{"a":4,"b":8},"goal":"up","fences_left":9,"role":"human"},{"position":{"a":4,"b":0},"goal":"down","fences_left":10,"role":"ai"}]}"#;
/// let s: Result<Snapshot, _> = serde_json::from_slice(body);
/// # assert!(s.is_ok());
/// ```
/// and then `Game::from_snapshot` to get something you can play on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub size: u8,
    pub players: Vec<PlayerState>,
    #[serde(default)]
    pub fences: Vec<Fence>,
    pub current: PlayerId,
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

impl Snapshot {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
