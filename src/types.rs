//! various types that are useful for working with quoridor
use crate::wire_representation::Position;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// column offset
    pub a: i32,
    /// row offset
    pub b: i32,
}

/// Represents one of the four orthogonal directions on the board. Rows grow
/// downwards, so `Up` decreases `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
}

/// number of directions, handy for fixed size tables
pub const N_DIRECTIONS: usize = 4;

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
        }
    }
}

impl Direction {
    /// convert this direction to a vector
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Up => Vector { a: 0, b: -1 },
            Direction::Right => Vector { a: 1, b: 0 },
            Direction::Down => Vector { a: 0, b: 1 },
            Direction::Left => Vector { a: -1, b: 0 },
        }
    }

    /// create a Direction from the given unit vector, None for anything that isn't one
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { a: 0, b: -1 } => Some(Self::Up),
            Vector { a: 1, b: 0 } => Some(Self::Right),
            Vector { a: 0, b: 1 } => Some(Self::Down),
            Vector { a: -1, b: 0 } => Some(Self::Left),
            _ => None,
        }
    }

    /// returns all directions, in the same order as `as_index`
    pub fn all() -> [Direction; N_DIRECTIONS] {
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
    }

    /// converts this direction to a usize index. indices are the same order as the `Direction::all()` method
    pub fn as_index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// the direction pointing the other way, e.g. Up for Down
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// checks if a given direction is at a right angle to this one. e.g. Up is perpendicular to
    /// Left, but not to Down
    pub fn is_perpendicular(&self, other: &Direction) -> bool {
        self.is_vertical() != other.is_vertical()
    }

    /// true for Up and Down
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// token to represent a player id, the index of the player in the game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// convert this player ID to a usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Who decides the actions of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// actions are submitted by the presentation layer
    Human,
    /// actions are picked by `crate::ai`
    Ai,
}

/// How a legal pawn move gets to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// a single orthogonal step to a free cell
    Step,
    /// a straight jump over an adjacent pawn
    Jump,
    /// a move next to an adjacent pawn, used when the straight jump is unavailable
    SideStep,
}

/// A game for which the player ids can be listed
pub trait PlayerIDGettableGame {
    #[allow(missing_docs)]
    fn get_player_ids(&self) -> Vec<PlayerId>;
}

/// A game which can have it's winner determined
pub trait VictorDeterminableGame: Debug + PlayerIDGettableGame {
    #[allow(missing_docs)]
    fn is_over(&self) -> bool;

    /// get the winner for a given game, will return None if the game is not over
    fn get_winner(&self) -> Option<PlayerId>;
}

/// a game for which the neighbors of a given Position can be determined
pub trait NeighborDeterminableGame {
    /// returns the neighboring positions that are on the board, fences are not considered
    fn neighbors(&self, pos: &Position) -> Vec<Position>;

    /// returns the neighboring positions, and the Direction required to get to each
    fn possible_moves(&self, pos: &Position) -> Vec<(Direction, Position)>;
}

/// a game for which the size of the game board can be determined
pub trait SizeDeterminableGame {
    /// the size of the fence grid, the board has `size + 1` cells per side
    fn get_size(&self) -> u8;
}

/// a game for which each player's distance to its goal line can be queried
pub trait DistanceQueryableGame {
    /// shortest number of steps from the player's cell to its goal line, None when
    /// fences cut the player off entirely
    fn distance_to_goal(&self, player_id: &PlayerId) -> Option<u32>;
}
