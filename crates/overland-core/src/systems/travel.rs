//! Daily travel: route planning, point accrual, and the cell step.

use hecs::World;
use overland_logic::coords::Coord;
use overland_logic::pathfinding::find_path;
use overland_logic::rate::movement_rate;

use crate::components::{
    AgentStatus, HomeBinding, Name, Position, Transport, TravelGoal, TravelProgress,
};
use crate::config::SimConfig;
use crate::grid::TerrainGrid;
use crate::locations::LocationRegistry;
use crate::systems::ordered_agents;

/// One day of travel for every active agent with a goal:
///
/// 1. Plan a route with A*. An unreachable goal is retargeted to the
///    agent's home when the home resolves somewhere else; otherwise the
///    goal is abandoned.
/// 2. An empty route means the agent is standing on its goal: arrival,
///    goal cleared.
/// 3. Otherwise earn movement points at the departure cell's rate, and
///    once a full day's worth is banked, step into the next route cell.
///    One cell per day at most; surplus whole days are forfeited so the
///    bank always stays below one day's worth.
pub fn travel_system(
    world: &mut World,
    grid: &TerrainGrid,
    config: &SimConfig,
    locations: &LocationRegistry,
) {
    for entity in ordered_agents(world) {
        let stopped = match world.get::<&AgentStatus>(entity) {
            Ok(status) => status.is_stopped(),
            Err(_) => continue,
        };
        if stopped {
            continue;
        }

        let goal = match world.get::<&TravelGoal>(entity) {
            Ok(goal) => goal.target,
            Err(_) => continue,
        };
        let position = match world.get::<&Position>(entity) {
            Ok(position) => position.cell,
            Err(_) => continue,
        };
        let mode = match world.get::<&Transport>(entity) {
            Ok(transport) => config.transports.effective_mode(
                &transport.mode,
                transport.override_mode.as_deref(),
                &transport.equipment,
            ),
            Err(_) => continue,
        };

        let rate_at = |cell| {
            movement_rate(
                &mode,
                grid.terrain_at(cell),
                &config.terrain_costs,
                &config.scale,
            )
        };
        let path = find_path(
            position,
            goal,
            grid.width(),
            grid.height(),
            config.astar_budget,
            &rate_at,
        );

        let Some(path) = path else {
            retarget_or_abandon(world, entity, position, goal, locations);
            continue;
        };

        let Some(&next) = path.first() else {
            // Standing on the goal already; the trip is over.
            log::debug!("agent {:?} arrived at {:?}", entity, goal);
            let _ = world.remove_one::<TravelGoal>(entity);
            continue;
        };

        let earned = rate_at(position);
        let daily_max = config.scale.daily_max_points;
        let mut step = false;
        if let Ok(mut progress) = world.get::<&mut TravelProgress>(entity) {
            progress.points += earned;
            if progress.points >= daily_max {
                progress.points -= daily_max;
                // One cell per day regardless of surplus; extra whole days
                // of points are forfeited. The remainder stays bounded even
                // for rates far beyond one day's worth.
                if progress.points >= daily_max {
                    progress.points %= daily_max;
                }
                step = true;
            }
        }
        if step {
            if let Ok(mut pos) = world.get::<&mut Position>(entity) {
                pos.cell = next;
            }
        }
    }
}

/// The goal cannot be reached. Head home instead when a bound home
/// resolves to somewhere other than where the agent stands; otherwise drop
/// the goal.
fn retarget_or_abandon(
    world: &mut World,
    entity: hecs::Entity,
    position: Coord,
    goal: Coord,
    locations: &LocationRegistry,
) {
    let name = world
        .get::<&Name>(entity)
        .map(|n| n.0.clone())
        .unwrap_or_default();
    let home = world
        .get::<&HomeBinding>(entity)
        .ok()
        .and_then(|binding| locations.coordinate(&binding.location));

    match home {
        Some(home_coord) if home_coord != position => {
            log::warn!(
                "{} cannot reach {:?}; heading home to {:?}",
                name,
                goal,
                home_coord
            );
            let _ = world.insert_one(entity, TravelGoal { target: home_coord });
        }
        _ => {
            log::warn!("{} cannot reach {:?}; goal abandoned", name, goal);
            let _ = world.remove_one::<TravelGoal>(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::AgentKind;
    use overland_logic::terrain::TerrainCategory;
    use overland_logic::transport::TransportMode;

    fn spawn_walker(world: &mut World, q: i32, r: i32) -> hecs::Entity {
        world.spawn((
            Name::new("walker"),
            AgentKind::Player,
            Position::new(q, r),
            AgentStatus::Active,
            Transport::default(),
            TravelProgress::default(),
        ))
    }

    fn run(world: &mut World, grid: &TerrainGrid, config: &SimConfig) {
        travel_system(world, grid, config, &LocationRegistry::new());
    }

    #[test]
    fn test_points_accrue_without_moving_below_threshold() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let config = SimConfig::default();
        let agent = spawn_walker(&mut world, 5, 5);
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        // Walking on land earns 7.5 points a day; 50 are needed.
        run(&mut world, &grid, &config);

        assert_eq!(world.get::<&Position>(agent).unwrap().cell, Coord::new(5, 5));
        let points = world.get::<&TravelProgress>(agent).unwrap().points;
        assert!((points - 7.5).abs() < 1e-4);
    }

    #[test]
    fn test_step_happens_once_a_full_day_is_banked() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let config = SimConfig::default();
        let agent = spawn_walker(&mut world, 5, 5);
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        // 7 days at 7.5 points: banked 52.5 on the seventh, one step taken.
        for _ in 0..7 {
            run(&mut world, &grid, &config);
        }

        let position = world.get::<&Position>(agent).unwrap().cell;
        assert_eq!(position.manhattan(&Coord::new(5, 5)), 1);
        let points = world.get::<&TravelProgress>(agent).unwrap().points;
        assert!((points - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_departure_cell_sets_the_rate() {
        let mut world = World::new();
        let mut grid = TerrainGrid::filled(20, 20, TerrainCategory::Camp);
        // The agent stands on slow ice; the rest of the row is fast camp.
        grid.set(Coord::new(5, 5), TerrainCategory::Ice);
        let config = SimConfig::default();
        let agent = spawn_walker(&mut world, 5, 5);
        world
            .insert_one(agent, TravelGoal { target: Coord::new(10, 5) })
            .unwrap();

        run(&mut world, &grid, &config);

        // Ice on foot: (30 / 2.5) / 200 * 50 = 3 points, not camp's 15.
        let points = world.get::<&TravelProgress>(agent).unwrap().points;
        assert!((points - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_surplus_days_are_forfeited() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let mut config = SimConfig::default();
        // 900 km/day earns 225 points, several days' worth at once.
        config
            .transports
            .define("glider", TransportMode::new(30.0, Vec::new(), 1.0));
        let agent = spawn_walker(&mut world, 5, 5);
        if let Ok(mut transport) = world.get::<&mut Transport>(agent) {
            transport.mode = "glider".to_string();
        }
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        run(&mut world, &grid, &config);

        let position = world.get::<&Position>(agent).unwrap().cell;
        assert_eq!(position.manhattan(&Coord::new(5, 5)), 1, "one cell per day");
        let points = world.get::<&TravelProgress>(agent).unwrap().points;
        assert!(points >= 0.0 && points < config.scale.daily_max_points);
    }

    #[test]
    fn test_extreme_rates_keep_the_bank_bounded() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let mut config = SimConfig::default();
        // Billions of points a day; subtracting 50 from the bank would be
        // absorbed by f32 rounding and loop forever.
        config
            .transports
            .define("rocket", TransportMode::new(5.0e8, Vec::new(), 1.0));
        let agent = spawn_walker(&mut world, 5, 5);
        if let Ok(mut transport) = world.get::<&mut Transport>(agent) {
            transport.mode = "rocket".to_string();
        }
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        for _ in 0..3 {
            run(&mut world, &grid, &config);
        }

        let position = world.get::<&Position>(agent).unwrap().cell;
        assert_eq!(position.manhattan(&Coord::new(5, 5)), 3, "one cell per day");
        let points = world.get::<&TravelProgress>(agent).unwrap().points;
        assert!(points >= 0.0 && points < config.scale.daily_max_points);
    }

    #[test]
    fn test_zero_cost_factor_mode_cannot_move() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let mut config = SimConfig::default();
        config
            .transports
            .define("sled", TransportMode::new(1.0, Vec::new(), 0.0));
        let agent = spawn_walker(&mut world, 5, 5);
        if let Ok(mut transport) = world.get::<&mut Transport>(agent) {
            transport.mode = "sled".to_string();
        }
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        run(&mut world, &grid, &config);

        // The rate comes out zero everywhere, so the goal is unreachable
        // and gets dropped; nothing accrues and nothing moves.
        assert_eq!(world.get::<&Position>(agent).unwrap().cell, Coord::new(5, 5));
        assert_eq!(world.get::<&TravelProgress>(agent).unwrap().points, 0.0);
        assert!(world.get::<&TravelGoal>(agent).is_err());
    }

    #[test]
    fn test_arrival_clears_the_goal() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let config = SimConfig::default();
        let agent = spawn_walker(&mut world, 5, 5);
        world
            .insert_one(agent, TravelGoal { target: Coord::new(5, 5) })
            .unwrap();

        run(&mut world, &grid, &config);

        assert!(world.get::<&TravelGoal>(agent).is_err());
        assert_eq!(world.get::<&TravelProgress>(agent).unwrap().points, 0.0);
    }

    #[test]
    fn test_unreachable_goal_is_abandoned_without_a_home() {
        let mut world = World::new();
        let mut grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        grid.fill_rect(10, 0, 10, 19, TerrainCategory::Void);
        let config = SimConfig::default();
        let agent = spawn_walker(&mut world, 5, 5);
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        run(&mut world, &grid, &config);

        assert!(world.get::<&TravelGoal>(agent).is_err());
        assert_eq!(world.get::<&Position>(agent).unwrap().cell, Coord::new(5, 5));
    }

    #[test]
    fn test_unreachable_goal_retargets_home() {
        let mut world = World::new();
        let mut grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        grid.fill_rect(10, 0, 10, 19, TerrainCategory::Void);
        let config = SimConfig::default();
        let mut locations = LocationRegistry::new();
        locations.register("Camp", Coord::new(2, 2));

        let agent = spawn_walker(&mut world, 5, 5);
        world.insert_one(agent, HomeBinding::new("Camp", 30)).unwrap();
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        travel_system(&mut world, &grid, &config, &locations);

        assert_eq!(
            world.get::<&TravelGoal>(agent).unwrap().target,
            Coord::new(2, 2)
        );
    }

    #[test]
    fn test_unreachable_goal_while_standing_at_home_is_abandoned() {
        let mut world = World::new();
        let mut grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        grid.fill_rect(10, 0, 10, 19, TerrainCategory::Void);
        let config = SimConfig::default();
        let mut locations = LocationRegistry::new();
        locations.register("Camp", Coord::new(5, 5));

        let agent = spawn_walker(&mut world, 5, 5);
        world.insert_one(agent, HomeBinding::new("Camp", 30)).unwrap();
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();

        travel_system(&mut world, &grid, &config, &locations);

        assert!(world.get::<&TravelGoal>(agent).is_err());
    }

    #[test]
    fn test_stopped_agent_does_not_travel() {
        let mut world = World::new();
        let grid = TerrainGrid::filled(20, 20, TerrainCategory::Land);
        let config = SimConfig::default();
        let agent = spawn_walker(&mut world, 5, 5);
        world
            .insert_one(agent, TravelGoal { target: Coord::new(15, 5) })
            .unwrap();
        if let Ok(mut status) = world.get::<&mut AgentStatus>(agent) {
            *status = AgentStatus::Stopped;
        }

        for _ in 0..10 {
            run(&mut world, &grid, &config);
        }

        assert_eq!(world.get::<&Position>(agent).unwrap().cell, Coord::new(5, 5));
        assert_eq!(world.get::<&TravelProgress>(agent).unwrap().points, 0.0);
    }
}
