//! Settings a game is created from
use serde::{Deserialize, Serialize};
use std::error::Error;

use crate::types::Role;

/// default board size, the classic 9x9 cells
pub const DEFAULT_SIZE: u8 = 8;

/// largest board size played, two players on it start with 250 fences each
pub const MAX_SIZE: u8 = 40;

/// How to set up a new game. One role per player, 2 or 4 players.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// number of fence slots per side, the board has `size + 1` cells per side
    #[serde(default = "default_size")]
    pub size: u8,
    /// who controls each player, in turn order
    #[serde(default = "default_roles")]
    pub roles: Vec<Role>,
}

fn default_size() -> u8 {
    DEFAULT_SIZE
}

fn default_roles() -> Vec<Role> {
    vec![Role::Human, Role::Ai]
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: default_size(),
            roles: default_roles(),
        }
    }
}

impl GameConfig {
    /// a config for the given size and roles
    pub fn new(size: u8, roles: Vec<Role>) -> Self {
        GameConfig { size, roles }
    }

    #[allow(missing_docs)]
    pub fn player_count(&self) -> usize {
        self.roles.len()
    }

    /// the size actually played, odd sizes are rounded up so the bases sit on a middle cell
    pub fn board_size(&self) -> u8 {
        self.size.saturating_add(self.size % 2)
    }

    /// how many fences each player starts with
    pub fn fence_allowance(&self) -> u8 {
        let size = self.board_size() as u32;
        let players = self.player_count() as u32;
        if players == 0 {
            return 0;
        }
        // floor((size^2 * 5/16 + players/2) / players), kept in sixteenths to stay integral
        let numerator = size * size * 5 + players * 8;
        u8::try_from(numerator / (16 * players)).unwrap_or(u8::MAX)
    }

    /// check the config describes a game that can be played
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let size = self.board_size();
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(format!("board size {} is out of range", self.size).into());
        }
        if self.player_count() != 2 && self.player_count() != 4 {
            return Err(format!(
                "quoridor is played by 2 or 4 players, not {}",
                self.player_count()
            )
            .into());
        }
        Ok(())
    }
}
