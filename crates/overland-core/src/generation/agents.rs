//! Agent assembly: every agent enters the world with the same component
//! set, whatever its kind.

use hecs::{Entity, World};
use overland_logic::coords::Coord;

use crate::components::{AgentKind, AgentStatus, Name, Position, Transport, TravelProgress};

/// Spawn a fully-formed agent: named, placed, active, on foot, with an
/// empty point bank. Goals and home bindings are attached separately.
/// Bounds checking is the caller's job.
pub fn spawn_agent(world: &mut World, name: &str, kind: AgentKind, position: Coord) -> Entity {
    world.spawn((
        Name::new(name),
        kind,
        Position { cell: position },
        AgentStatus::Active,
        Transport::default(),
        TravelProgress::default(),
    ))
}
