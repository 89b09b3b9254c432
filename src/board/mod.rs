//! The board: static topology, fence edges and pawn occupancy kept apart, and composed
//! here into neighbor resolution.
//!
//! A neighbor is computed, never stored: [Grid] says which cell lies in a direction,
//! [EdgeState] says whether a fence is in the way, and [Occupancy] says whether a
//! pawn stands there.

mod edges;
mod fences;
mod grid;
mod occupancy;

pub use edges::{EdgeState, EdgeUndo};
pub use fences::{Fence, FenceLedger, Orientation};
pub use grid::{CellIndex, Grid};
pub use occupancy::Occupancy;

use crate::types::{Direction, PlayerId};
use crate::wire_representation::Position;

/// What sits across an open edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    /// an empty cell
    Cell(Position),
    /// a cell with a pawn on it
    Pawn(PlayerId, Position),
}

impl Neighbor {
    /// the cell, whoever is on it
    pub fn position(&self) -> Position {
        match self {
            Neighbor::Cell(p) | Neighbor::Pawn(_, p) => *p,
        }
    }
}

/// All mutable board state
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    edges: EdgeState,
    fences: FenceLedger,
    occupancy: Occupancy,
}

impl Board {
    /// an empty board with every edge open
    pub fn new(size: u8) -> Self {
        let grid = Grid::new(size);
        Board {
            grid,
            edges: EdgeState::new(grid),
            fences: FenceLedger::new(),
            occupancy: Occupancy::new(grid),
        }
    }

    #[allow(missing_docs)]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[allow(missing_docs)]
    pub fn edges(&self) -> &EdgeState {
        &self.edges
    }

    #[allow(missing_docs)]
    pub fn fences(&self) -> &FenceLedger {
        &self.fences
    }

    #[allow(missing_docs)]
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// is the edge leaving pos towards dir free of fences and inside the board
    pub fn is_open(&self, pos: Position, dir: Direction) -> bool {
        self.edges.is_open(pos, dir)
    }

    /// what a pawn on pos sees when looking in dir, None if a fence or the board edge is
    /// in the way
    pub fn resolve(&self, pos: Position, dir: Direction) -> Option<Neighbor> {
        if !self.edges.is_open(pos, dir) {
            return None;
        }
        let next = self.grid.neighbor(pos, dir)?;
        Some(match self.occupancy.at(next) {
            Some(id) => Neighbor::Pawn(id, next),
            None => Neighbor::Cell(next),
        })
    }

    /// is fence inside the board and clear of every placed fence
    pub fn fence_fits(&self, fence: &Fence) -> bool {
        fence.in_bounds(self.grid.size()) && !self.fences.conflicts(fence)
    }

    /// block a fence's edges without recording it, see [Board::restore]
    pub fn sever(&mut self, fence: &Fence) -> EdgeUndo {
        self.edges.sever(fence)
    }

    /// undo a [Board::sever]
    pub fn restore(&mut self, undo: EdgeUndo) {
        self.edges.restore(undo)
    }

    /// record a fence whose edges are already severed
    pub fn commit_fence(&mut self, fence: Fence) {
        self.fences.commit(fence);
    }

    /// put a pawn on the board
    pub fn place_pawn(&mut self, id: PlayerId, pos: Position) {
        self.occupancy.place(id, pos);
    }

    /// move a pawn
    pub fn move_pawn(&mut self, id: PlayerId, from: Position, to: Position) {
        self.occupancy.move_player(id, from, to);
    }
}
