use crate::types::{Direction, NeighborDeterminableGame, SizeDeterminableGame};
use crate::wire_representation::Position;

/// wrapper type for an index in to the cell tables of a board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct CellIndex(pub u16);

impl CellIndex {
    /// makes a new cell index from a position, needs to know the width of the board
    pub fn new(pos: Position, width: u16) -> Self {
        Self((pos.b as u16) * width + pos.a as u16)
    }

    /// build a CellIndex from a usize
    pub fn from_usize(u: usize) -> Self {
        Self(u as u16)
    }

    /// get a usize from a CellIndex
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// converts a cellindex to a position
    pub fn into_position(self, width: u16) -> Position {
        let b = (self.0 / width) as i32;
        let a = (self.0 % width) as i32;
        Position { a, b }
    }
}

/// The static topology of a square board. Cells are addressed by `(a, b)` with
/// `0 <= a, b <= size`, so a board of size 8 has 9x9 cells and 8x8 fence slots.
///
/// Nothing here knows about fences or pawns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u8,
}

impl Grid {
    /// Build a grid, size is the number of fence slots per side
    pub fn new(size: u8) -> Self {
        debug_assert!(size >= 2 && size < u8::MAX);
        Self { size }
    }

    #[allow(missing_docs)]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// number of cells along one side
    pub fn width(&self) -> u16 {
        self.size as u16 + 1
    }

    /// total number of cells
    pub fn cell_count(&self) -> usize {
        let w = self.width() as usize;
        w * w
    }

    /// determines if a given position is not on the board
    pub fn off_board(&self, pos: Position) -> bool {
        pos.a < 0 || pos.b < 0 || pos.a > self.size as i32 || pos.b > self.size as i32
    }

    /// index of an on-board position in the cell tables
    pub fn cell_index(&self, pos: Position) -> CellIndex {
        debug_assert!(!self.off_board(pos), "{} is off the board", pos);
        CellIndex::new(pos, self.width())
    }

    /// the position for a cell table index
    pub fn position(&self, idx: CellIndex) -> Position {
        idx.into_position(self.width())
    }

    /// the neighbor of pos in the given direction, None past the board edge
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let next = pos.add_vec(dir.to_vector());
        if self.off_board(next) {
            None
        } else {
            Some(next)
        }
    }

    /// every position on the board, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width();
        (0..self.cell_count()).map(move |i| CellIndex::from_usize(i).into_position(width))
    }

    /// is this position on the line a player heading towards goal wants to reach
    pub fn is_on_goal(&self, pos: Position, goal: Direction) -> bool {
        let size = self.size as i32;
        match goal {
            Direction::Up => pos.b == 0,
            Direction::Right => pos.a == size,
            Direction::Down => pos.b == size,
            Direction::Left => pos.a == 0,
        }
    }

    /// all the cells forming the goal line for goal
    pub fn goal_line(&self, goal: Direction) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |p| self.is_on_goal(*p, goal))
    }

    /// the goal a pawn starting on base heads towards
    pub fn goal_for_base(&self, base: Position) -> Direction {
        let size = self.size as i32;
        if base.a == 0 {
            Direction::Right
        } else if base.a == size {
            Direction::Left
        } else if base.b == 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// starting cells, in player order, for the given number of players
    pub fn bases(&self, player_count: usize) -> Vec<Position> {
        let size = self.size as i32;
        let half = size / 2;
        if player_count == 2 {
            vec![Position::new(half, size), Position::new(half, 0)]
        } else {
            vec![
                Position::new(half, size),
                Position::new(0, half),
                Position::new(half, 0),
                Position::new(size, half),
            ]
        }
    }
}

impl SizeDeterminableGame for Grid {
    fn get_size(&self) -> u8 {
        self.size
    }
}

impl NeighborDeterminableGame for Grid {
    fn neighbors(&self, pos: &Position) -> Vec<Position> {
        Direction::all()
            .iter()
            .filter_map(|d| self.neighbor(*pos, *d))
            .collect()
    }

    fn possible_moves(&self, pos: &Position) -> Vec<(Direction, Position)> {
        Direction::all()
            .iter()
            .filter_map(|d| self.neighbor(*pos, *d).map(|p| (*d, p)))
            .collect()
    }
}
