//! JSON world templates: initial agents, locations, and custom transport
//! modes.
//!
//! A template captures the setup surface of a world, not its live state:
//! banked movement points, temporary overrides, and home counters belong
//! to snapshots ([`crate::persistence`]). Loading folds custom transports
//! into the catalog before the engine is built, then spawns and wires the
//! agents, rejecting unknown transport names and out-of-grid coordinates.

use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};

use overland_logic::coords::Coord;
use overland_logic::transport::{TransportMode, ON_FOOT};
use serde::{Deserialize, Serialize};

use crate::components::{
    AgentKind, AgentStatus, HomeBinding, Name, Position, Transport, TravelGoal,
};
use crate::config::SimConfig;
use crate::engine::Simulation;
use crate::grid::TerrainGrid;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldFile {
    pub players: Vec<AgentRecord>,
    pub npcs: Vec<AgentRecord>,
    pub groups: Vec<AgentRecord>,
    pub locations: HashMap<String, Coord>,
    pub custom_transports: HashMap<String, TransportMode>,
}

/// One agent as a world file states it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    pub name: String,
    pub position: Coord,
    #[serde(default = "default_transport")]
    pub transport: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub goal: Option<Coord>,
    /// A stopped agent holds no goal; `stopped: true` wins over `goal`.
    #[serde(default)]
    pub stopped: bool,
    #[serde(default)]
    pub home: Option<HomeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeRecord {
    pub location: String,
    pub return_interval_days: u32,
}

fn default_transport() -> String {
    ON_FOOT.to_string()
}

#[derive(Debug)]
pub enum WorldFileError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// An agent or location sits outside the grid.
    OutOfBounds { name: String, coord: Coord },
    /// An agent names a transport the catalog does not know.
    UnknownTransport { name: String, mode: String },
    /// A custom transport whose numerics cannot produce a usable rate.
    InvalidTransport { mode: String },
}

impl From<std::io::Error> for WorldFileError {
    fn from(err: std::io::Error) -> Self {
        WorldFileError::Io(err)
    }
}

impl From<serde_json::Error> for WorldFileError {
    fn from(err: serde_json::Error) -> Self {
        WorldFileError::Json(err)
    }
}

impl fmt::Display for WorldFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldFileError::Io(err) => write!(f, "io error: {}", err),
            WorldFileError::Json(err) => write!(f, "world file is not valid json: {}", err),
            WorldFileError::OutOfBounds { name, coord } => {
                write!(f, "'{}' places ({}, {}) outside the grid", name, coord.q, coord.r)
            }
            WorldFileError::UnknownTransport { name, mode } => {
                write!(f, "'{}' uses unknown transport '{}'", name, mode)
            }
            WorldFileError::InvalidTransport { mode } => {
                write!(
                    f,
                    "custom transport '{}' needs a positive, finite speed and cost factor",
                    mode
                )
            }
        }
    }
}

impl std::error::Error for WorldFileError {}

impl WorldFile {
    pub fn from_json(json: &str) -> Result<Self, WorldFileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, WorldFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a template from any source, usually an opened file.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, WorldFileError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json(&json)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), WorldFileError> {
        let json = self.to_json()?;
        writer.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Build a running simulation from this template. Custom transports
    /// are validated and folded into the config catalog first so agent
    /// records may refer to them.
    pub fn into_simulation(
        self,
        mut config: SimConfig,
        grid: TerrainGrid,
    ) -> Result<Simulation, WorldFileError> {
        for (name, mode) in &self.custom_transports {
            if !mode.is_valid() {
                return Err(WorldFileError::InvalidTransport { mode: name.clone() });
            }
            config.transports.define(name.clone(), mode.clone());
        }

        let mut sim = Simulation::new(config, grid);

        for (name, coord) in &self.locations {
            sim.register_location(name, *coord)
                .map_err(|_| WorldFileError::OutOfBounds {
                    name: name.clone(),
                    coord: *coord,
                })?;
        }

        let batches = [
            (AgentKind::Npc, &self.npcs),
            (AgentKind::Group, &self.groups),
            (AgentKind::Player, &self.players),
        ];
        for (kind, records) in batches {
            for record in records {
                spawn_record(&mut sim, kind, record)?;
            }
        }

        log::info!(
            "world file loaded: {} agent(s), {} location(s), {} custom transport(s)",
            sim.agent_count(),
            sim.locations().len(),
            sim.config().transports.custom_modes().len()
        );
        Ok(sim)
    }

    /// Export a simulation's setup back into template form.
    pub fn from_simulation(sim: &Simulation) -> WorldFile {
        let mut file = WorldFile::default();

        for (_, (name, kind, position, status, transport, goal, home)) in sim
            .world
            .query::<(
                &Name,
                &AgentKind,
                &Position,
                &AgentStatus,
                &Transport,
                Option<&TravelGoal>,
                Option<&HomeBinding>,
            )>()
            .iter()
        {
            let record = AgentRecord {
                name: name.0.clone(),
                position: position.cell,
                transport: transport.mode.clone(),
                equipment: transport.equipment.clone(),
                goal: goal.map(|g| g.target),
                stopped: status.is_stopped(),
                home: home.map(|h| HomeRecord {
                    location: h.location.clone(),
                    return_interval_days: h.return_interval_days,
                }),
            };
            match kind {
                AgentKind::Player => file.players.push(record),
                AgentKind::Npc => file.npcs.push(record),
                AgentKind::Group => file.groups.push(record),
            }
        }

        for (name, coord) in sim.locations().iter() {
            file.locations.insert(name.to_string(), coord);
        }
        file.custom_transports = sim.config().transports.custom_modes().clone();
        file
    }
}

fn spawn_record(
    sim: &mut Simulation,
    kind: AgentKind,
    record: &AgentRecord,
) -> Result<(), WorldFileError> {
    if !sim.config().transports.contains(&record.transport) {
        return Err(WorldFileError::UnknownTransport {
            name: record.name.clone(),
            mode: record.transport.clone(),
        });
    }

    let spawned = match kind {
        AgentKind::Player => sim.spawn_player(&record.name, record.position),
        AgentKind::Npc => sim.spawn_npc(&record.name, record.position),
        AgentKind::Group => sim.spawn_group(&record.name, record.position),
    };
    let agent = spawned.map_err(|_| WorldFileError::OutOfBounds {
        name: record.name.clone(),
        coord: record.position,
    })?;

    let _ = sim.set_transport_mode(agent, &record.transport);
    for flag in &record.equipment {
        let _ = sim.grant_equipment(agent, flag);
    }
    if let Some(goal) = record.goal {
        sim.set_goal(agent, goal)
            .map_err(|_| WorldFileError::OutOfBounds {
                name: record.name.clone(),
                coord: goal,
            })?;
    }
    if let Some(home) = &record.home {
        let _ = sim.bind_home(agent, &home.location, home.return_interval_days);
    }
    if record.stopped {
        let _ = sim.set_status(agent, AgentStatus::Stopped);
    }
    Ok(())
}
