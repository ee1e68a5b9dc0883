//! Grid coordinates and neighbor math.

use serde::{Deserialize, Serialize};

/// A cell address on the rectangular world grid. `q` runs west to east,
/// `r` runs north to south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub q: i32,
    pub r: i32,
}

impl Coord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.q.abs_diff(other.q) + self.r.abs_diff(other.r)
    }

    /// The four cardinal neighbors in fixed order: south, north, east, west.
    /// The order is load-bearing: the pathfinder breaks frontier ties by
    /// insertion order, so reordering this array changes returned paths.
    pub fn neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.q, self.r + 1),
            Coord::new(self.q, self.r - 1),
            Coord::new(self.q + 1, self.r),
            Coord::new(self.q - 1, self.r),
        ]
    }

    /// Whether the cell lies inside a `width` x `height` grid.
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.q >= 0 && self.q < width && self.r >= 0 && self.r < height
    }
}
