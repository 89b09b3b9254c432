use std::error::Error;
use std::fmt;

use crate::types::PlayerId;

/// The rule a rejected move or fence broke. These are expected outcomes of play, shown to
/// humans as hints and treated by the ai as "not a candidate".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleViolation {
    /// the player has no fences left
    R1,
    /// not a single orthogonal step
    R2,
    /// a fence is in the way
    R3,
    /// the fence overlaps or crosses another one, or sticks out of the board
    R4,
    /// the fence would leave some player without a way to its goal line
    R5,
    /// the target holds an adjacent pawn, which has to be jumped instead
    R6,
    /// a side-step is only allowed when the straight jump is blocked
    R7,
    /// only one pawn can be jumped
    R8,
}

impl RuleViolation {
    /// the rule number, 1 to 8
    pub fn code(&self) -> u8 {
        match self {
            RuleViolation::R1 => 1,
            RuleViolation::R2 => 2,
            RuleViolation::R3 => 3,
            RuleViolation::R4 => 4,
            RuleViolation::R5 => 5,
            RuleViolation::R6 => 6,
            RuleViolation::R7 => 7,
            RuleViolation::R8 => 8,
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RuleViolation::R1 => "a player who has run out of fences must move their pawn",
            RuleViolation::R2 => {
                "pawns move one square at a time, horizontally or vertically, forwards or backwards"
            }
            RuleViolation::R3 => "pawns must get around the fences",
            RuleViolation::R4 => "fences must be placed between two sets of two squares",
            RuleViolation::R5 => "every pawn must keep a way to its goal line",
            RuleViolation::R6 => {
                "a pawn facing another one with no fence between them jumps over it"
            }
            RuleViolation::R7 => {
                "a pawn can go beside the pawn it faces only when a fence is behind that pawn"
            }
            RuleViolation::R8 => "only one pawn can be jumped at a time",
        };
        write!(f, "rule {}: {}", self.code(), text)
    }
}

impl Error for RuleViolation {}

/// Why a submitted action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// the action broke a rule of the game
    Rule(RuleViolation),
    /// someone other than the current player tried to act
    NotYourTurn {
        #[allow(missing_docs)]
        expected: PlayerId,
        #[allow(missing_docs)]
        got: PlayerId,
    },
    /// the game is finished, nobody acts anymore
    GameOver {
        #[allow(missing_docs)]
        winner: PlayerId,
    },
    /// the id isn't one of the game's players
    UnknownPlayer(PlayerId),
    /// the player has neither a legal move nor a fence to place
    Stuck(PlayerId),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Rule(v) => write!(f, "{}", v),
            EngineError::NotYourTurn { expected, got } => {
                write!(f, "it is {}'s turn, not {}'s", expected, got)
            }
            EngineError::GameOver { winner } => write!(f, "the game is over, {} won", winner),
            EngineError::UnknownPlayer(id) => write!(f, "{} is not in this game", id),
            EngineError::Stuck(id) => write!(f, "{} has no legal action", id),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EngineError::Rule(v) => Some(v),
            _ => None,
        }
    }
}

impl From<RuleViolation> for EngineError {
    fn from(v: RuleViolation) -> Self {
        EngineError::Rule(v)
    }
}
