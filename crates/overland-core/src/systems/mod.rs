//! Systems: the per-day logic that runs over agent components.

use hecs::{Entity, World};

use crate::components::AgentKind;

mod goals;
mod travel;

pub use goals::*;
pub use travel::*;

/// Agents in scheduler order: npcs, then groups, then players, ascending
/// entity id within each kind. Wander rolls consume the shared RNG in this
/// order, so it is part of the determinism contract.
pub(crate) fn ordered_agents(world: &World) -> Vec<Entity> {
    let mut agents: Vec<(AgentKind, u64, Entity)> = world
        .query::<&AgentKind>()
        .iter()
        .map(|(entity, kind)| (*kind, entity.to_bits().get(), entity))
        .collect();
    agents.sort_by_key(|&(kind, bits, _)| (kind, bits));
    agents.into_iter().map(|(_, _, entity)| entity).collect()
}
