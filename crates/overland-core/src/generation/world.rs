//! A small built-in continent for demos and integration tests.

use overland_logic::coords::Coord;
use overland_logic::terrain::TerrainCategory;

use crate::grid::TerrainGrid;

/// Landmarks the demo continent places camps at.
pub const DEMO_LOCATIONS: [(&str, Coord); 3] = [
    ("Riverside", Coord::new(96, 40)),
    ("Highcamp", Coord::new(137, 28)),
    ("Southholt", Coord::new(60, 70)),
];

/// A full-size world with one continent: ocean all around, an ice fringe
/// in the north, a forest belt, a north-south river, a rocky massif, and
/// camps at the demo locations.
pub fn demo_world() -> TerrainGrid {
    let mut grid = TerrainGrid::world_filled(TerrainCategory::Ocean);

    // The continent proper.
    grid.fill_rect(10, 5, 189, 80, TerrainCategory::Land);
    // Northern ice fringe.
    grid.fill_rect(10, 5, 189, 9, TerrainCategory::Ice);
    // Forest belt across the midwest.
    grid.fill_rect(30, 20, 90, 45, TerrainCategory::Vegetation);
    // A river splitting the continent north to south.
    grid.fill_rect(100, 5, 102, 80, TerrainCategory::Water);
    // Rocky massif in the east.
    grid.fill_rect(140, 30, 160, 60, TerrainCategory::Rock);

    for (_, coord) in DEMO_LOCATIONS {
        grid.set(coord, TerrainCategory::Camp);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_world_layout() {
        let grid = demo_world();
        assert_eq!(grid.width(), 200);
        assert_eq!(grid.height(), 86);
        // Ocean ring, ice fringe, interior land.
        assert_eq!(grid.terrain_at(Coord::new(0, 0)), TerrainCategory::Ocean);
        assert_eq!(grid.terrain_at(Coord::new(50, 6)), TerrainCategory::Ice);
        assert_eq!(grid.terrain_at(Coord::new(120, 50)), TerrainCategory::Land);
        assert_eq!(grid.terrain_at(Coord::new(101, 40)), TerrainCategory::Water);
        assert_eq!(grid.terrain_at(Coord::new(150, 45)), TerrainCategory::Rock);
    }

    #[test]
    fn test_demo_locations_are_camps_on_the_map() {
        let grid = demo_world();
        for (name, coord) in DEMO_LOCATIONS {
            assert!(grid.in_bounds(coord), "{}", name);
            assert_eq!(grid.terrain_at(coord), TerrainCategory::Camp, "{}", name);
        }
    }
}
