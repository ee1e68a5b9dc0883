//! Components attached to agent entities.

mod agents;
mod common;

pub use agents::*;
pub use common::*;
