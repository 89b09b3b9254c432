use serde::Serialize;
use std::fmt::Debug;

use crate::board::Fence;
use crate::types::{MoveKind, PlayerId};
use crate::wire_representation::Position;

/// Something that happened to a game, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum GameEvent {
    /// a pawn moved
    MoveCommitted {
        player: PlayerId,
        from: Position,
        to: Position,
        kind: MoveKind,
    },
    /// a fence was placed
    FenceCommitted { player: PlayerId, fence: Fence },
    /// the turn passed to `current`
    TurnAdvanced { current: PlayerId },
    /// somebody reached their goal line, nothing happens after this
    GameFinished { winner: PlayerId },
}

/// Callbacks for a running game, e.g. to redraw a board or feed a log
pub trait GameObserver: Debug {
    /// called after each state change
    fn observe(&mut self, event: &GameEvent);
}

/// An observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {
    fn observe(&mut self, _event: &GameEvent) {}
}

/// An observer that keeps every event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// everything observed so far, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// hand over the events observed so far and start again empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameObserver for EventLog {
    fn observe(&mut self, event: &GameEvent) {
        self.events.push(*event);
    }
}
