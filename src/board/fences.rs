use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire_representation::Position;

/// Which way a fence lies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// blocks vertical movement between rows `b` and `b + 1`
    Horizontal,
    /// blocks horizontal movement between columns `a` and `a + 1`
    Vertical,
}

impl Orientation {
    /// both orientations, horizontal first
    pub fn all() -> [Orientation; 2] {
        [Orientation::Horizontal, Orientation::Vertical]
    }
}

/// A fence two cells long, anchored at the cell `(a, b)` it runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fence {
    /// column of the anchor cell
    pub a: i32,
    /// row of the anchor cell
    pub b: i32,
    #[allow(missing_docs)]
    pub orientation: Orientation,
}

impl fmt::Display for Fence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = match self.orientation {
            Orientation::Horizontal => "h",
            Orientation::Vertical => "v",
        };
        write!(f, "{}{},{}", o, self.a, self.b)
    }
}

impl Fence {
    #[allow(missing_docs)]
    pub fn new(a: i32, b: i32, orientation: Orientation) -> Self {
        Fence { a, b, orientation }
    }

    #[allow(missing_docs)]
    pub fn horizontal(a: i32, b: i32) -> Self {
        Self::new(a, b, Orientation::Horizontal)
    }

    #[allow(missing_docs)]
    pub fn vertical(a: i32, b: i32) -> Self {
        Self::new(a, b, Orientation::Vertical)
    }

    /// is the anchor inside the `size x size` grid of fence slots
    pub fn in_bounds(&self, size: u8) -> bool {
        let size = size as i32;
        self.a >= 0 && self.b >= 0 && self.a < size && self.b < size
    }

    /// true if the two fences overlap or cross. Same orientation fences clash when they share
    /// the cross axis coordinate and are less than two apart along the axis, any two fences
    /// clash when they share an anchor.
    pub fn conflicts_with(&self, other: &Fence) -> bool {
        let da = (self.a - other.a).abs();
        let db = (self.b - other.b).abs();
        if da == 0 && db == 0 {
            return true;
        }
        if self.orientation != other.orientation {
            return false;
        }
        match self.orientation {
            Orientation::Horizontal => db == 0 && da < 2,
            Orientation::Vertical => da == 0 && db < 2,
        }
    }

    /// The two cell pairs this fence separates. Each pair is one open edge in each
    /// direction, four directed edges in total.
    pub fn edges_severed(&self) -> [(Position, Position); 2] {
        let (a, b) = (self.a, self.b);
        match self.orientation {
            Orientation::Horizontal => [
                (Position::new(a, b), Position::new(a, b + 1)),
                (Position::new(a + 1, b), Position::new(a + 1, b + 1)),
            ],
            Orientation::Vertical => [
                (Position::new(a, b), Position::new(a + 1, b)),
                (Position::new(a, b + 1), Position::new(a + 1, b + 1)),
            ],
        }
    }

    /// the anchors of every fence this one could clash with
    fn clash_candidates(&self) -> [Fence; 4] {
        let o = self.orientation;
        let other = match o {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        };
        match o {
            Orientation::Horizontal => [
                Fence::new(self.a - 1, self.b, o),
                Fence::new(self.a, self.b, o),
                Fence::new(self.a + 1, self.b, o),
                Fence::new(self.a, self.b, other),
            ],
            Orientation::Vertical => [
                Fence::new(self.a, self.b - 1, o),
                Fence::new(self.a, self.b, o),
                Fence::new(self.a, self.b + 1, o),
                Fence::new(self.a, self.b, other),
            ],
        }
    }
}

/// The fences placed so far, in placement order. Fences are never taken back.
#[derive(Debug, Clone, Default)]
pub struct FenceLedger {
    placed: Vec<Fence>,
    lookup: FxHashSet<Fence>,
}

impl FenceLedger {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// true if candidate overlaps or crosses any placed fence
    pub fn conflicts(&self, candidate: &Fence) -> bool {
        candidate
            .clash_candidates()
            .iter()
            .any(|f| self.lookup.contains(f))
    }

    /// the cell pairs a fence at this spot would block, whether or not it's placed
    pub fn edges_severed(&self, candidate: &Fence) -> [(Position, Position); 2] {
        candidate.edges_severed()
    }

    /// record a fence, callers are expected to have checked `conflicts` first
    pub fn commit(&mut self, fence: Fence) {
        debug_assert!(!self.conflicts(&fence), "{} clashes with a placed fence", fence);
        self.placed.push(fence);
        self.lookup.insert(fence);
    }

    /// placed fences in the order they went up
    pub fn iter(&self) -> std::slice::Iter<'_, Fence> {
        self.placed.iter()
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// is there a fence with exactly this anchor and orientation
    pub fn contains(&self, fence: &Fence) -> bool {
        self.lookup.contains(fence)
    }
}
