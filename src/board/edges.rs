use crate::types::Direction;
use crate::wire_representation::Position;

use super::fences::Fence;
use super::grid::{CellIndex, Grid};

const BLOCKED_UP: u8 = 0x01;
const BLOCKED_RIGHT: u8 = 0x02;
const BLOCKED_DOWN: u8 = 0x04;
const BLOCKED_LEFT: u8 = 0x08;

fn flag(dir: Direction) -> u8 {
    match dir {
        Direction::Up => BLOCKED_UP,
        Direction::Right => BLOCKED_RIGHT,
        Direction::Down => BLOCKED_DOWN,
        Direction::Left => BLOCKED_LEFT,
    }
}

/// The open/blocked flag for every edge between adjacent cells, one byte of flags per cell.
/// Board edges are not stored, `Grid::neighbor` already returns None past them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeState {
    grid: Grid,
    blocked: Vec<u8>,
}

/// What a cell's flags were before a fence went up, enough to put them back exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeUndo {
    saved: [(CellIndex, u8); 4],
}

impl EdgeState {
    /// every edge open
    pub fn new(grid: Grid) -> Self {
        EdgeState {
            grid,
            blocked: vec![0; grid.cell_count()],
        }
    }

    /// can a pawn (or a path) cross from pos in direction dir. False past the board edge.
    pub fn is_open(&self, pos: Position, dir: Direction) -> bool {
        if self.grid.neighbor(pos, dir).is_none() {
            return false;
        }
        self.blocked[self.grid.cell_index(pos).as_usize()] & flag(dir) == 0
    }

    /// neighbors of pos reachable without crossing a fence
    pub fn open_neighbors(&self, pos: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::all().into_iter().filter_map(move |d| {
            if self.is_open(pos, d) {
                self.grid.neighbor(pos, d).map(|n| (d, n))
            } else {
                None
            }
        })
    }

    /// block all four directed edges of fence, returning what's needed to undo it
    pub fn sever(&mut self, fence: &Fence) -> EdgeUndo {
        let [(p0, q0), (p1, q1)] = fence.edges_severed();
        let cells = [p0, q0, p1, q1].map(|p| self.grid.cell_index(p));
        let saved = cells.map(|idx| (idx, self.blocked[idx.as_usize()]));

        for (from, to) in [(p0, q0), (p1, q1)] {
            if let Some(d) = from.direction_to(&to) {
                self.set_blocked(from, d);
                self.set_blocked(to, d.opposite());
            }
        }
        EdgeUndo { saved }
    }

    /// put the cells touched by a `sever` back as they were
    pub fn restore(&mut self, undo: EdgeUndo) {
        for (idx, flags) in undo.saved {
            self.blocked[idx.as_usize()] = flags;
        }
    }

    fn set_blocked(&mut self, pos: Position, dir: Direction) {
        let idx = self.grid.cell_index(pos).as_usize();
        self.blocked[idx] |= flag(dir);
    }

    /// the raw flag bytes, in cell index order
    pub fn as_bytes(&self) -> &[u8] {
        &self.blocked
    }
}
