//! The simulation engine: owns the world and drives the daily tick.

use std::fmt;
use std::io::{Read, Write};

use hecs::{Entity, World};
use overland_logic::coords::Coord;
use overland_logic::pathfinding::find_path;
use overland_logic::rate::movement_rate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::components::{
    AgentKind, AgentStatus, HomeBinding, Name, Position, Transport, TravelGoal, TravelProgress,
};
use crate::config::SimConfig;
use crate::generation;
use crate::grid::TerrainGrid;
use crate::locations::LocationRegistry;
use crate::persistence::{self, SaveError};
use crate::systems::{goal_selection_system, travel_system};

/// Rejected simulation input, from world setup or agent management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// Coordinate outside the world grid.
    OutOfBounds(Coord),
    /// Entity is not an agent in this world.
    UnknownAgent,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::OutOfBounds(coord) => {
                write!(f, "coordinate ({}, {}) is outside the world grid", coord.q, coord.r)
            }
            SimError::UnknownAgent => write!(f, "no such agent in this world"),
        }
    }
}

impl std::error::Error for SimError {}

/// Why a route could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Entity is not an agent in this world.
    UnknownAgent,
    /// The agent has no destination right now.
    NoGoal,
    /// No traversable route exists within the search budget.
    Unreachable,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownAgent => write!(f, "no such agent in this world"),
            RouteError::NoGoal => write!(f, "agent has no destination"),
            RouteError::Unreachable => write!(f, "no traversable route to the destination"),
        }
    }
}

impl std::error::Error for RouteError {}

/// A running world: agents, terrain, locations, configuration, clock, and
/// the seeded random source behind wander goals.
///
/// `advance` is the only way time passes. Everything else either sets up
/// the world or inspects it.
pub struct Simulation {
    /// The ECS world holding every agent.
    pub world: World,
    config: SimConfig,
    grid: TerrainGrid,
    locations: LocationRegistry,
    rng: ChaCha8Rng,
    day: u64,
}

impl Simulation {
    /// A fresh world on day zero. The RNG is seeded from the config, so
    /// two simulations built from equal inputs evolve identically.
    pub fn new(config: SimConfig, grid: TerrainGrid) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            world: World::new(),
            config,
            grid,
            locations: LocationRegistry::new(),
            rng,
            day: 0,
        }
    }

    /// Advance the clock by whole days. Each day runs goal selection, then
    /// travel, over every agent.
    pub fn advance(&mut self, days: u32) {
        log::info!("advancing {} day(s) from day {}", days, self.day);
        for _ in 0..days {
            self.day += 1;
            log::debug!("day {} begins", self.day);
            goal_selection_system(
                &mut self.world,
                &self.grid,
                &self.config,
                &self.locations,
                &mut self.rng,
            );
            travel_system(&mut self.world, &self.grid, &self.config, &self.locations);
        }
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn locations(&self) -> &LocationRegistry {
        &self.locations
    }

    // ------------------------------------------------------------------
    // World setup
    // ------------------------------------------------------------------

    /// Register a named location for home bindings.
    pub fn register_location(&mut self, name: &str, coord: Coord) -> Result<(), SimError> {
        if !self.grid.in_bounds(coord) {
            return Err(SimError::OutOfBounds(coord));
        }
        self.locations.register(name, coord);
        Ok(())
    }

    pub fn spawn_player(&mut self, name: &str, position: Coord) -> Result<Entity, SimError> {
        self.spawn(name, AgentKind::Player, position)
    }

    pub fn spawn_npc(&mut self, name: &str, position: Coord) -> Result<Entity, SimError> {
        self.spawn(name, AgentKind::Npc, position)
    }

    pub fn spawn_group(&mut self, name: &str, position: Coord) -> Result<Entity, SimError> {
        self.spawn(name, AgentKind::Group, position)
    }

    fn spawn(
        &mut self,
        name: &str,
        kind: AgentKind,
        position: Coord,
    ) -> Result<Entity, SimError> {
        if !self.grid.in_bounds(position) {
            return Err(SimError::OutOfBounds(position));
        }
        let entity = generation::spawn_agent(&mut self.world, name, kind, position);
        log::debug!("spawned {} {:?} at {:?}", kind.name(), entity, position);
        Ok(entity)
    }

    // ------------------------------------------------------------------
    // Agent management
    // ------------------------------------------------------------------

    /// Point an agent at a destination cell. Players are steered only this
    /// way; autonomous agents keep the goal until policy replaces it.
    pub fn set_goal(&mut self, agent: Entity, target: Coord) -> Result<(), SimError> {
        self.ensure_agent(agent)?;
        if !self.grid.in_bounds(target) {
            return Err(SimError::OutOfBounds(target));
        }
        let _ = self.world.insert_one(agent, TravelGoal { target });
        Ok(())
    }

    /// Drop the agent's destination, if any.
    pub fn clear_goal(&mut self, agent: Entity) -> Result<(), SimError> {
        self.ensure_agent(agent)?;
        let _ = self.world.remove_one::<TravelGoal>(agent);
        Ok(())
    }

    /// Tie the agent to a named location it must revisit periodically. The
    /// name may be registered later; until it resolves the binding is
    /// dormant.
    pub fn bind_home(
        &mut self,
        agent: Entity,
        location: &str,
        return_interval_days: u32,
    ) -> Result<(), SimError> {
        self.ensure_agent(agent)?;
        let _ = self
            .world
            .insert_one(agent, HomeBinding::new(location, return_interval_days));
        Ok(())
    }

    /// Park or release an agent. Either transition drops the current goal:
    /// a parked agent keeps nothing pending, and a released one starts
    /// fresh.
    pub fn set_status(&mut self, agent: Entity, status: AgentStatus) -> Result<(), SimError> {
        self.ensure_agent(agent)?;
        if let Ok(mut current) = self.world.get::<&mut AgentStatus>(agent) {
            *current = status;
        }
        let _ = self.world.remove_one::<TravelGoal>(agent);
        Ok(())
    }

    /// Assign the agent's transport mode by catalog name.
    pub fn set_transport_mode(&mut self, agent: Entity, mode: &str) -> Result<(), SimError> {
        self.ensure_agent(agent)?;
        if let Ok(mut transport) = self.world.get::<&mut Transport>(agent) {
            transport.mode = mode.to_string();
        }
        Ok(())
    }

    /// Set or clear a temporary mode consulted before the assigned one.
    pub fn set_transport_override(
        &mut self,
        agent: Entity,
        mode: Option<&str>,
    ) -> Result<(), SimError> {
        self.ensure_agent(agent)?;
        if let Ok(mut transport) = self.world.get::<&mut Transport>(agent) {
            transport.override_mode = mode.map(str::to_string);
        }
        Ok(())
    }

    /// Give the agent an equipment flag, unlocking gated transport modes.
    pub fn grant_equipment(&mut self, agent: Entity, flag: &str) -> Result<(), SimError> {
        self.ensure_agent(agent)?;
        if let Ok(mut transport) = self.world.get::<&mut Transport>(agent) {
            if !transport.has_equipment(flag) {
                transport.equipment.push(flag.to_string());
            }
        }
        Ok(())
    }

    fn ensure_agent(&self, agent: Entity) -> Result<(), SimError> {
        if self.world.get::<&AgentKind>(agent).is_ok() {
            Ok(())
        } else {
            Err(SimError::UnknownAgent)
        }
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn agent_count(&self) -> usize {
        self.world.query::<&AgentKind>().iter().count()
    }

    pub fn kind_count(&self, kind: AgentKind) -> usize {
        self.world
            .query::<&AgentKind>()
            .iter()
            .filter(|(_, k)| **k == kind)
            .count()
    }

    /// First agent with the given display name.
    pub fn find_agent(&self, name: &str) -> Option<Entity> {
        self.world
            .query::<&Name>()
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(entity, _)| entity)
    }

    pub fn position(&self, agent: Entity) -> Option<Coord> {
        self.world.get::<&Position>(agent).ok().map(|p| p.cell)
    }

    pub fn goal(&self, agent: Entity) -> Option<Coord> {
        self.world.get::<&TravelGoal>(agent).ok().map(|g| g.target)
    }

    pub fn progress(&self, agent: Entity) -> Option<f32> {
        self.world
            .get::<&TravelProgress>(agent)
            .ok()
            .map(|p| p.points)
    }

    pub fn status(&self, agent: Entity) -> Option<AgentStatus> {
        self.world.get::<&AgentStatus>(agent).ok().map(|s| *s)
    }

    pub fn transport(&self, agent: Entity) -> Option<Transport> {
        self.world
            .get::<&Transport>(agent)
            .ok()
            .map(|t| (*t).clone())
    }

    pub fn home_binding(&self, agent: Entity) -> Option<HomeBinding> {
        self.world
            .get::<&HomeBinding>(agent)
            .ok()
            .map(|h| (*h).clone())
    }

    /// The route the agent would take toward its current goal, planned with
    /// today's effective transport. Purely an inspection: nothing moves and
    /// no randomness is consumed. An empty route means the agent stands on
    /// its goal.
    pub fn route(&self, agent: Entity) -> Result<Vec<Coord>, RouteError> {
        let position = self
            .world
            .get::<&Position>(agent)
            .map_err(|_| RouteError::UnknownAgent)?
            .cell;
        let transport = (*self
            .world
            .get::<&Transport>(agent)
            .map_err(|_| RouteError::UnknownAgent)?)
        .clone();
        let goal = self
            .world
            .get::<&TravelGoal>(agent)
            .map_err(|_| RouteError::NoGoal)?
            .target;

        let mode = self.config.transports.effective_mode(
            &transport.mode,
            transport.override_mode.as_deref(),
            &transport.equipment,
        );
        let rate_at = |cell| {
            movement_rate(
                &mode,
                self.grid.terrain_at(cell),
                &self.config.terrain_costs,
                &self.config.scale,
            )
        };
        find_path(
            position,
            goal,
            self.grid.width(),
            self.grid.height(),
            self.config.astar_budget,
            &rate_at,
        )
        .ok_or(RouteError::Unreachable)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Snapshot the whole simulation to a writer.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_simulation(
            writer,
            &self.world,
            self.day,
            &self.config,
            &self.grid,
            &self.locations,
        )
    }

    /// Rebuild a simulation from a snapshot. The random source is reseeded
    /// from the config seed; saved state is bit-identical, the wander
    /// stream is not resumed mid-sequence.
    pub fn load<R: Read>(reader: R) -> Result<Self, SaveError> {
        let loaded = persistence::load_simulation(reader)?;
        let rng = ChaCha8Rng::seed_from_u64(loaded.config.seed);
        Ok(Self {
            world: loaded.world,
            config: loaded.config,
            grid: loaded.grid,
            locations: loaded.locations,
            rng,
            day: loaded.day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overland_logic::terrain::TerrainCategory;

    fn land_sim() -> Simulation {
        Simulation::new(
            SimConfig::default(),
            TerrainGrid::filled(30, 30, TerrainCategory::Land),
        )
    }

    #[test]
    fn test_spawn_and_count() {
        let mut sim = land_sim();
        sim.spawn_player("Mara", Coord::new(1, 1)).unwrap();
        sim.spawn_npc("Oren", Coord::new(2, 2)).unwrap();
        sim.spawn_npc("Tal", Coord::new(3, 3)).unwrap();
        sim.spawn_group("Caravan", Coord::new(4, 4)).unwrap();

        assert_eq!(sim.agent_count(), 4);
        assert_eq!(sim.kind_count(AgentKind::Player), 1);
        assert_eq!(sim.kind_count(AgentKind::Npc), 2);
        assert_eq!(sim.kind_count(AgentKind::Group), 1);
    }

    #[test]
    fn test_spawn_rejects_out_of_bounds() {
        let mut sim = land_sim();
        let err = sim.spawn_npc("Lost", Coord::new(40, 2)).unwrap_err();
        assert_eq!(err, SimError::OutOfBounds(Coord::new(40, 2)));
    }

    #[test]
    fn test_set_goal_validates_input() {
        let mut sim = land_sim();
        let player = sim.spawn_player("Mara", Coord::new(1, 1)).unwrap();
        assert!(sim.set_goal(player, Coord::new(20, 20)).is_ok());
        assert_eq!(
            sim.set_goal(player, Coord::new(-1, 5)),
            Err(SimError::OutOfBounds(Coord::new(-1, 5)))
        );

        let ghost = sim.world.spawn(());
        assert_eq!(
            sim.set_goal(ghost, Coord::new(2, 2)),
            Err(SimError::UnknownAgent)
        );
    }

    #[test]
    fn test_advance_counts_days() {
        let mut sim = land_sim();
        assert_eq!(sim.day(), 0);
        sim.advance(5);
        assert_eq!(sim.day(), 5);
        sim.advance(0);
        assert_eq!(sim.day(), 5);
    }

    #[test]
    fn test_player_walks_toward_goal() {
        let mut sim = land_sim();
        let player = sim.spawn_player("Mara", Coord::new(5, 5)).unwrap();
        sim.set_goal(player, Coord::new(5, 15)).unwrap();

        // 7.5 points a day on land: a cell every 50 points.
        sim.advance(20);
        let after = sim.position(player).unwrap();
        assert_eq!(after.manhattan(&Coord::new(5, 5)), 3);
        assert_eq!(sim.goal(player), Some(Coord::new(5, 15)));
    }

    #[test]
    fn test_stopping_clears_the_goal() {
        let mut sim = land_sim();
        let player = sim.spawn_player("Mara", Coord::new(5, 5)).unwrap();
        sim.set_goal(player, Coord::new(10, 10)).unwrap();

        sim.set_status(player, AgentStatus::Stopped).unwrap();
        assert_eq!(sim.goal(player), None);
        assert_eq!(sim.status(player), Some(AgentStatus::Stopped));

        // A stopped agent sits out any number of days.
        sim.advance(10);
        assert_eq!(sim.position(player), Some(Coord::new(5, 5)));

        sim.set_status(player, AgentStatus::Active).unwrap();
        assert_eq!(sim.status(player), Some(AgentStatus::Active));
    }

    #[test]
    fn test_reactivated_npc_wanders_again() {
        let mut sim = land_sim();
        let npc = sim.spawn_npc("Oren", Coord::new(5, 5)).unwrap();
        sim.set_status(npc, AgentStatus::Stopped).unwrap();

        sim.advance(3);
        assert_eq!(sim.goal(npc), None);
        assert_eq!(sim.progress(npc), Some(0.0));

        sim.set_status(npc, AgentStatus::Active).unwrap();
        sim.advance(3);
        let banked = sim.progress(npc).unwrap_or(0.0);
        assert!(banked > 0.0 || sim.goal(npc).is_some());
    }

    #[test]
    fn test_route_inspection() {
        let mut sim = land_sim();
        let player = sim.spawn_player("Mara", Coord::new(2, 2)).unwrap();

        assert_eq!(sim.route(player), Err(RouteError::NoGoal));

        sim.set_goal(player, Coord::new(2, 6)).unwrap();
        let route = sim.route(player).unwrap();
        assert_eq!(route.len(), 4);
        assert_eq!(route.last(), Some(&Coord::new(2, 6)));

        // Inspection moves nothing.
        assert_eq!(sim.position(player), Some(Coord::new(2, 2)));
    }

    #[test]
    fn test_route_reports_unreachable() {
        let mut grid = TerrainGrid::filled(30, 30, TerrainCategory::Land);
        grid.fill_rect(15, 0, 15, 29, TerrainCategory::Void);
        let mut sim = Simulation::new(SimConfig::default(), grid);
        let player = sim.spawn_player("Mara", Coord::new(2, 2)).unwrap();
        sim.set_goal(player, Coord::new(25, 2)).unwrap();
        assert_eq!(sim.route(player), Err(RouteError::Unreachable));
    }

    #[test]
    fn test_find_agent_by_name() {
        let mut sim = land_sim();
        let oren = sim.spawn_npc("Oren", Coord::new(2, 2)).unwrap();
        sim.spawn_npc("Tal", Coord::new(3, 3)).unwrap();
        assert_eq!(sim.find_agent("Oren"), Some(oren));
        assert_eq!(sim.find_agent("Nobody"), None);
    }

    #[test]
    fn test_equipment_gates_resolve_through_engine() {
        let mut sim = Simulation::new(
            SimConfig::default(),
            TerrainGrid::filled(30, 30, TerrainCategory::Ocean),
        );
        let sailor = sim.spawn_player("Brin", Coord::new(5, 5)).unwrap();
        sim.set_transport_mode(sailor, "ocean_ship").unwrap();
        sim.set_goal(sailor, Coord::new(5, 10)).unwrap();

        // Without the ship the sailor is on foot, and feet cannot cross
        // open ocean.
        assert_eq!(sim.route(sailor), Err(RouteError::Unreachable));

        sim.grant_equipment(sailor, "ship").unwrap();
        assert!(sim.route(sailor).is_ok());
    }

    #[test]
    fn test_transport_override_round_trip() {
        let mut sim = land_sim();
        let rider = sim.spawn_player("Mara", Coord::new(5, 5)).unwrap();
        sim.set_transport_override(rider, Some("horse")).unwrap();
        assert_eq!(
            sim.transport(rider).unwrap().override_mode.as_deref(),
            Some("horse")
        );
        sim.set_transport_override(rider, None).unwrap();
        assert_eq!(sim.transport(rider).unwrap().override_mode, None);
    }

    #[test]
    fn test_register_location_validates_bounds() {
        let mut sim = land_sim();
        assert!(sim.register_location("Camp", Coord::new(3, 3)).is_ok());
        assert_eq!(
            sim.register_location("Bad", Coord::new(99, 3)),
            Err(SimError::OutOfBounds(Coord::new(99, 3)))
        );
        assert_eq!(sim.locations().coordinate("Camp"), Some(Coord::new(3, 3)));
    }
}
