use crate::types::PlayerId;
use crate::wire_representation::Position;

use super::grid::Grid;

/// Which player, if any, stands on each cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    grid: Grid,
    cells: Vec<Option<PlayerId>>,
}

impl Occupancy {
    /// an empty board
    pub fn new(grid: Grid) -> Self {
        Occupancy {
            grid,
            cells: vec![None; grid.cell_count()],
        }
    }

    /// the player on pos, None for an empty or off board cell
    pub fn at(&self, pos: Position) -> Option<PlayerId> {
        if self.grid.off_board(pos) {
            return None;
        }
        self.cells[self.grid.cell_index(pos).as_usize()]
    }

    /// put a pawn on an empty cell
    pub fn place(&mut self, id: PlayerId, pos: Position) {
        let idx = self.grid.cell_index(pos).as_usize();
        debug_assert!(self.cells[idx].is_none(), "{} is already taken", pos);
        self.cells[idx] = Some(id);
    }

    /// move a pawn between cells, `from` must hold it
    pub fn move_player(&mut self, id: PlayerId, from: Position, to: Position) {
        let from_idx = self.grid.cell_index(from).as_usize();
        debug_assert_eq!(self.cells[from_idx], Some(id));
        self.cells[from_idx] = None;
        self.place(id, to);
    }
}
