//! # Overland Core
//!
//! Daily-tick travel simulation: mobile agents crossing a terrain grid on
//! foot, horseback, boats, or whatever the world defines. Each simulated
//! day every active agent picks or keeps a goal, accumulates movement
//! points against the terrain it stands on, and steps one cell along an
//! A*-planned route once it has banked enough.
//!
//! ## Architecture
//!
//! Built on the `hecs` ECS. Agents are entities; their name, kind,
//! position, transport, progress, goal, and home binding are plain-data
//! components. Two systems run per day, in order:
//!
//! 1. [`systems::goal_selection_system`] - home-binding bookkeeping and
//!    goal selection for autonomous agents
//! 2. [`systems::travel_system`] - route planning, point accrual, and the
//!    actual cell step
//!
//! [`engine::Simulation`] owns the world, the terrain grid, the immutable
//! [`config::SimConfig`], the location registry, and a seeded RNG, and is
//! the API surface callers use.
//!
//! ## Example
//!
//! ```no_run
//! use overland_core::prelude::*;
//!
//! # fn main() -> Result<(), SimError> {
//! let config = SimConfig::default();
//! let grid = TerrainGrid::world_filled(TerrainCategory::Land);
//! let mut sim = Simulation::new(config, grid);
//!
//! let rider = sim.spawn_player("Mara", Coord::new(10, 10))?;
//! sim.set_transport_mode(rider, "horse")?;
//! sim.set_goal(rider, Coord::new(60, 40))?;
//!
//! sim.advance(30);
//! println!("day {}: at {:?}", sim.day(), sim.position(rider));
//! # Ok(())
//! # }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod generation;
pub mod grid;
pub mod locations;
pub mod persistence;
pub mod systems;
pub mod world_file;

/// Common imports for downstream users.
pub mod prelude {
    pub use crate::components::{
        AgentKind, AgentStatus, HomeBinding, Name, Position, Transport, TravelGoal, TravelProgress,
    };
    pub use crate::config::{ConfigError, SimConfig};
    pub use crate::engine::{RouteError, SimError, Simulation};
    pub use crate::grid::TerrainGrid;
    pub use crate::locations::LocationRegistry;
    pub use crate::world_file::WorldFile;
    pub use overland_logic::coords::Coord;
    pub use overland_logic::terrain::{TerrainCategory, TerrainCosts};
    pub use overland_logic::transport::{TransportCatalog, TransportMode};
}
