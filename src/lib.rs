#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Types for playing [quoridor](https://en.wikipedia.org/wiki/Quoridor).
//! The goal is to provide a rules engine that a presentation layer can drive, plus a
//! simple ai to play against.
//!
//! The board is kept as three separate layers: the fixed grid topology, the edges fences
//! have severed, and which pawn stands where. [rules::Game] puts them together, checks
//! every action against the rules and keeps each player's distance to its goal line up
//! to date. [ai] plays whole turns on top of it:
//! ```
//! use quoridor_game_types::ai::play_turn;
//! use quoridor_game_types::config::GameConfig;
//! use quoridor_game_types::rules::Game;
//! use quoridor_game_types::types::{Role, VictorDeterminableGame};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let config = GameConfig::new(8, vec![Role::Ai, Role::Ai]);
//! let mut game = Game::new(&config).unwrap();
//! let mut rng = SmallRng::seed_from_u64(0);
//! while !game.is_over() {
//!     play_turn(&mut game, &mut rng).unwrap();
//! }
//! println!("{}", game);
//! ```

use rules::Game;
use wire_representation::Snapshot;

pub mod ai;
pub mod board;
pub mod config;
pub mod path_oracle;
pub mod rules;
pub mod types;
pub mod wire_representation;

/// Loads a fixture from a given string
pub fn game_fixture(game_fixture: &str) -> Game {
    let s: Result<Snapshot, _> = serde_json::from_str(game_fixture);
    let s = s.expect("the json literal is valid");
    Game::from_snapshot(&s).expect("the fixture describes a playable game")
}
