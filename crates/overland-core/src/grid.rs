//! Dense terrain grid the agents travel across.

use overland_logic::constants::{GRID_HEIGHT, GRID_WIDTH};
use overland_logic::coords::Coord;
use overland_logic::terrain::TerrainCategory;
use serde::{Deserialize, Serialize};

/// Row-major terrain raster. Out-of-bounds reads come back as `Void`, so
/// callers never handle a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    cells: Vec<TerrainCategory>,
}

impl TerrainGrid {
    /// A `width` x `height` grid with every cell set to `fill`.
    pub fn filled(width: i32, height: i32, fill: TerrainCategory) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
        }
    }

    /// A standard world-sized grid (200 x 86) with every cell set to `fill`.
    pub fn world_filled(fill: TerrainCategory) -> Self {
        Self::filled(GRID_WIDTH, GRID_HEIGHT, fill)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, cell: Coord) -> bool {
        cell.in_bounds(self.width, self.height)
    }

    fn index(&self, cell: Coord) -> usize {
        (cell.r * self.width + cell.q) as usize
    }

    /// Terrain at a cell; `Void` outside the grid.
    pub fn terrain_at(&self, cell: Coord) -> TerrainCategory {
        if self.in_bounds(cell) {
            self.cells[self.index(cell)]
        } else {
            TerrainCategory::Void
        }
    }

    /// Overwrite one cell. Writes outside the grid are ignored.
    pub fn set(&mut self, cell: Coord, terrain: TerrainCategory) {
        if self.in_bounds(cell) {
            let idx = self.index(cell);
            self.cells[idx] = terrain;
        }
    }

    /// Paint the inclusive rectangle from `(q0, r0)` to `(q1, r1)`,
    /// clipped to the grid.
    pub fn fill_rect(&mut self, q0: i32, r0: i32, q1: i32, r1: i32, terrain: TerrainCategory) {
        for r in r0..=r1 {
            for q in q0..=q1 {
                self.set(Coord::new(q, r), terrain);
            }
        }
    }
}
