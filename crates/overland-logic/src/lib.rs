//! # Overland Logic
//!
//! Pure decision logic for the Overland travel simulation. Everything in
//! this crate is a plain function or plain data: no ECS, no RNG, no I/O.
//! The companion `overland-core` crate owns the world state and feeds it
//! through these functions once per simulated day.
//!
//! ## Modules
//!
//! - [`constants`] - Grid dimensions and movement-policy constants
//! - [`coords`] - Grid coordinates and neighbor math
//! - [`terrain`] - Terrain categories and base traversal costs
//! - [`transport`] - Transport modes and the mode catalog
//! - [`rate`] - Movement-point rate model
//! - [`pathfinding`] - Budget-bounded A* over the terrain grid
//! - [`goal`] - Daily goal policy for autonomous agents

pub mod constants;
pub mod coords;
pub mod goal;
pub mod pathfinding;
pub mod rate;
pub mod terrain;
pub mod transport;
