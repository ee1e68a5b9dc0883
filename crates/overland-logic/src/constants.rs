//! Grid dimensions and movement-policy constants.

/// World grid width in cells.
pub const GRID_WIDTH: i32 = 200;

/// World grid height in cells.
pub const GRID_HEIGHT: i32 = 86;

/// Movement points an agent must accumulate to cross into the next cell.
pub const DAILY_MAX_POINTS: f32 = 50.0;

/// Kilometers an unburdened walker covers per day on ideal terrain.
pub const BASE_DAILY_KM: f32 = 30.0;

/// Width of one grid cell in kilometers.
pub const CELL_WIDTH_KM: f32 = 200.0;

/// Base terrain cost at or above which no transport mode may enter.
pub const IMPASSABLE_COST: f32 = 9000.0;

/// Default node-expansion budget for the pathfinder.
pub const DEFAULT_ASTAR_BUDGET: u32 = 1000;

/// Default number of random samples when rolling a wander goal.
pub const DEFAULT_WANDER_ATTEMPTS: u32 = 10;

/// Rates at or below this are treated as untraversable; also the epsilon
/// added to rates when weighting pathfinder edges.
pub const RATE_EPSILON: f32 = 0.01;
