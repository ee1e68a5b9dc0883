//! Daily goal selection for autonomous agents.

use hecs::World;
use overland_logic::coords::Coord;
use overland_logic::goal::{select_goal, GoalDecision, HomeCheck};
use overland_logic::rate::movement_rate;
use overland_logic::transport::TransportMode;
use rand::Rng;

use crate::components::{AgentKind, AgentStatus, HomeBinding, Position, Transport, TravelGoal};
use crate::config::SimConfig;
use crate::grid::TerrainGrid;
use crate::locations::LocationRegistry;
use crate::systems::ordered_agents;

/// One day of goal bookkeeping for every active agent:
///
/// 1. Advance days-since-home counters.
/// 2. For autonomous agents, run the goal policy: due home bindings
///    override, live goals persist, and goalless agents roll a wander
///    destination. Players are skipped; their goals are set externally.
///
/// A wander roll samples random cells until one is traversable for the
/// agent's effective transport; if every sample is blocked the agent
/// targets its own cell and will idle through the day.
pub fn goal_selection_system(
    world: &mut World,
    grid: &TerrainGrid,
    config: &SimConfig,
    locations: &LocationRegistry,
    rng: &mut impl Rng,
) {
    for entity in ordered_agents(world) {
        let stopped = match world.get::<&AgentStatus>(entity) {
            Ok(status) => status.is_stopped(),
            Err(_) => continue,
        };
        if stopped {
            continue;
        }

        // Another day on the road, wherever the agent is headed.
        if let Ok(mut binding) = world.get::<&mut HomeBinding>(entity) {
            binding.days_since_home += 1;
        }

        let kind = match world.get::<&AgentKind>(entity) {
            Ok(kind) => *kind,
            Err(_) => continue,
        };
        if !kind.is_autonomous() {
            continue;
        }

        let position = match world.get::<&Position>(entity) {
            Ok(position) => position.cell,
            Err(_) => continue,
        };
        let current_goal = world.get::<&TravelGoal>(entity).ok().map(|goal| goal.target);
        let home = world.get::<&HomeBinding>(entity).ok().map(|binding| HomeCheck {
            coord: locations.coordinate(&binding.location),
            days_since_home: binding.days_since_home,
            return_interval_days: binding.return_interval_days,
        });

        match select_goal(position, current_goal, home) {
            GoalDecision::ReturnHome(target) => {
                let _ = world.insert_one(entity, TravelGoal { target });
            }
            GoalDecision::Keep {
                reset_home_counter, ..
            } => {
                if reset_home_counter {
                    reset_counter(world, entity);
                }
            }
            GoalDecision::Wander { reset_home_counter } => {
                if reset_home_counter {
                    reset_counter(world, entity);
                }
                let mode = match world.get::<&Transport>(entity) {
                    Ok(transport) => config.transports.effective_mode(
                        &transport.mode,
                        transport.override_mode.as_deref(),
                        &transport.equipment,
                    ),
                    Err(_) => continue,
                };
                let target = roll_wander_goal(grid, &mode, config, rng).unwrap_or(position);
                log::debug!("agent {:?} wanders toward {:?}", entity, target);
                let _ = world.insert_one(entity, TravelGoal { target });
            }
        }
    }
}

fn reset_counter(world: &mut World, entity: hecs::Entity) {
    if let Ok(mut binding) = world.get::<&mut HomeBinding>(entity) {
        binding.days_since_home = 0;
    }
}

/// Sample random in-bounds cells until one yields a positive movement rate
/// for the mode. `None` after the configured number of misses.
fn roll_wander_goal(
    grid: &TerrainGrid,
    mode: &TransportMode,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<Coord> {
    for _ in 0..config.wander_attempts {
        let cell = Coord::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        let rate = movement_rate(
            mode,
            grid.terrain_at(cell),
            &config.terrain_costs,
            &config.scale,
        );
        if rate > 0.0 {
            return Some(cell);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Name, TravelProgress};
    use overland_logic::terrain::TerrainCategory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spawn(world: &mut World, kind: AgentKind, q: i32, r: i32) -> hecs::Entity {
        world.spawn((
            Name::new("test"),
            kind,
            Position::new(q, r),
            AgentStatus::Active,
            Transport::default(),
            TravelProgress::default(),
        ))
    }

    fn run(world: &mut World, grid: &TerrainGrid, locations: &LocationRegistry) {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        goal_selection_system(world, grid, &config, locations, &mut rng);
    }

    #[test]
    fn test_goalless_npc_rolls_a_wander_goal() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let npc = spawn(&mut world, AgentKind::Npc, 5, 5);

        run(&mut world, &grid, &LocationRegistry::new());

        let goal = world.get::<&TravelGoal>(npc).unwrap().target;
        assert!(grid.in_bounds(goal));
    }

    #[test]
    fn test_player_never_gets_an_automatic_goal() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let player = spawn(&mut world, AgentKind::Player, 5, 5);

        run(&mut world, &grid, &LocationRegistry::new());

        assert!(world.get::<&TravelGoal>(player).is_err());
    }

    #[test]
    fn test_stopped_agent_is_untouched() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let npc = spawn(&mut world, AgentKind::Npc, 5, 5);
        world.insert_one(npc, HomeBinding::new("Camp", 3)).unwrap();
        if let Ok(mut status) = world.get::<&mut AgentStatus>(npc) {
            *status = AgentStatus::Stopped;
        }

        run(&mut world, &grid, &LocationRegistry::new());

        assert!(world.get::<&TravelGoal>(npc).is_err());
        assert_eq!(world.get::<&HomeBinding>(npc).unwrap().days_since_home, 0);
    }

    #[test]
    fn test_due_home_binding_sets_home_goal() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let mut locations = LocationRegistry::new();
        locations.register("Camp", Coord::new(2, 2));

        let npc = spawn(&mut world, AgentKind::Npc, 10, 10);
        let mut binding = HomeBinding::new("Camp", 3);
        binding.days_since_home = 2; // becomes 3 once the day passes
        world.insert_one(npc, binding).unwrap();

        run(&mut world, &grid, &locations);

        assert_eq!(
            world.get::<&TravelGoal>(npc).unwrap().target,
            Coord::new(2, 2)
        );
    }

    #[test]
    fn test_standing_at_home_resets_counter_and_wanders() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let mut locations = LocationRegistry::new();
        locations.register("Camp", Coord::new(10, 10));

        let npc = spawn(&mut world, AgentKind::Npc, 10, 10);
        let mut binding = HomeBinding::new("Camp", 3);
        binding.days_since_home = 5;
        world.insert_one(npc, binding).unwrap();

        run(&mut world, &grid, &locations);

        assert_eq!(world.get::<&HomeBinding>(npc).unwrap().days_since_home, 0);
        assert!(world.get::<&TravelGoal>(npc).is_ok());
    }

    #[test]
    fn test_player_home_counter_still_advances() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let player = spawn(&mut world, AgentKind::Player, 5, 5);
        world
            .insert_one(player, HomeBinding::new("Camp", 30))
            .unwrap();

        run(&mut world, &grid, &LocationRegistry::new());

        assert_eq!(world.get::<&HomeBinding>(player).unwrap().days_since_home, 1);
    }

    #[test]
    fn test_live_goal_persists() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let npc = spawn(&mut world, AgentKind::Npc, 5, 5);
        world
            .insert_one(npc, TravelGoal { target: Coord::new(15, 15) })
            .unwrap();

        run(&mut world, &grid, &LocationRegistry::new());

        assert_eq!(
            world.get::<&TravelGoal>(npc).unwrap().target,
            Coord::new(15, 15)
        );
    }

    #[test]
    fn test_wander_on_blocked_world_targets_own_cell() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Void);
        let npc = spawn(&mut world, AgentKind::Npc, 5, 5);

        run(&mut world, &grid, &LocationRegistry::new());

        assert_eq!(
            world.get::<&TravelGoal>(npc).unwrap().target,
            Coord::new(5, 5)
        );
    }
}
