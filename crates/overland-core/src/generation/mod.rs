//! World and agent generation helpers.

mod agents;
mod world;

pub use agents::*;
pub use world::*;
