//! A simple computer opponent. It races the closest rival: when a fence widens the gap
//! between that rival's distance and its own, it places the best such fence, otherwise it
//! steps along a shortest route.
//!
//! Ties are broken with the `rng` handed in, so a seeded generator replays a game exactly.

use itertools::iproduct;
use rand::prelude::IteratorRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::board::{Fence, Orientation};
use crate::path_oracle;
use crate::rules::{EngineError, Game, GameObserver, TurnState};
use crate::types::{DistanceQueryableGame, MoveKind, PlayerId};
use crate::wire_representation::Position;

/// What the ai did with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// placed this fence
    Fence(Fence),
    /// moved its pawn
    Move {
        #[allow(missing_docs)]
        to: Position,
        #[allow(missing_docs)]
        kind: MoveKind,
    },
}

/// The rival closest to its goal line, picked at random among equals
pub fn choose_opponent<O: GameObserver, R: Rng>(
    game: &Game<O>,
    me: PlayerId,
    rng: &mut R,
) -> Option<PlayerId> {
    let rivals: Vec<(PlayerId, u32)> = game
        .players()
        .iter()
        .filter(|p| p.id() != me)
        .filter_map(|p| p.distance().map(|d| (p.id(), d)))
        .collect();
    let closest = rivals.iter().map(|(_, d)| *d).min()?;
    rivals
        .into_iter()
        .filter(|(_, d)| *d == closest)
        .map(|(id, _)| id)
        .choose(rng)
}

/// The fence that most improves `me`'s race against the closest rival, if any does.
///
/// Only worth it while `me` isn't already ahead: when the rival is farther from its goal
/// than `me`, no fence is placed. Every slot on the board is tried, a fence is picked only
/// if it does strictly better than the current gap and every earlier pick.
#[instrument(level = "trace", skip_all, fields(player = me.0))]
pub fn choose_fence<O: GameObserver, R: Rng>(
    game: &mut Game<O>,
    me: PlayerId,
    rng: &mut R,
) -> Option<Fence> {
    let mine = game.player(me)?;
    if mine.fences_left() == 0 {
        return None;
    }
    let opponent = choose_opponent(game, me, rng)?;
    let gap = |mine: u32, theirs: u32| mine as i64 - theirs as i64;
    let mut best_gap = gap(
        game.distance_to_goal(&me)?,
        game.distance_to_goal(&opponent)?,
    );
    if best_gap < 0 {
        return None;
    }

    let size = game.size() as i32;
    let mut best = None;
    for (a, b, orientation) in iproduct!(0..size, 0..size, Orientation::all()) {
        let fence = Fence::new(a, b, orientation);
        let distances = match game.probe_fence(&fence) {
            Ok(distances) => distances,
            Err(_) => continue,
        };
        let candidate_gap = gap(distances[me.as_usize()], distances[opponent.as_usize()]);
        if candidate_gap < best_gap {
            best_gap = candidate_gap;
            best = Some(fence);
        }
    }

    debug!(player = me.0, opponent = opponent.0, ?best, best_gap, "fence search done");
    best
}

/// A legal move to a cell closest to `me`'s goal line, picked at random among equals
#[instrument(level = "trace", skip_all, fields(player = me.0))]
pub fn choose_move<O: GameObserver, R: Rng>(
    game: &Game<O>,
    me: PlayerId,
    rng: &mut R,
) -> Option<(Position, MoveKind)> {
    let goal = game.player(me)?.goal();
    let labels = path_oracle::distance_map(game.board().grid(), game.board().edges(), goal);
    let scored: Vec<((Position, MoveKind), u32)> = game
        .legal_moves(me)
        .into_iter()
        .filter_map(|mv| labels.get(mv.0).map(|d| (mv, d)))
        .collect();
    let closest = scored.iter().map(|(_, d)| *d).min()?;
    scored
        .into_iter()
        .filter(|(_, d)| *d == closest)
        .map(|(mv, _)| mv)
        .choose(rng)
}

/// Play the current player's turn: place a fence if one helps, else move.
pub fn play_turn<O: GameObserver, R: Rng>(
    game: &mut Game<O>,
    rng: &mut R,
) -> Result<AiAction, EngineError> {
    let me = match game.turn_state() {
        TurnState::AwaitingAction(id) => id,
        TurnState::Finished(winner) => return Err(EngineError::GameOver { winner }),
    };

    if let Some(fence) = choose_fence(game, me, rng) {
        game.submit_fence(me, fence)?;
        return Ok(AiAction::Fence(fence));
    }
    let (to, _) = choose_move(game, me, rng).ok_or(EngineError::Stuck(me))?;
    let kind = game.submit_move(me, to)?;
    Ok(AiAction::Move { to, kind })
}
