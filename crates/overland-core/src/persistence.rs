//! Snapshot persistence: the whole simulation as one versioned bincode
//! blob.
//!
//! Agents cross the boundary as [`SerializableAgent`] rows, one `Option`
//! per component, so partial agents survive a round trip unchanged and new
//! components can be added without breaking old saves in the same version.

use std::fmt;
use std::io::{Read, Write};

use hecs::World;
use serde::{Deserialize, Serialize};

use crate::components::{
    AgentKind, AgentStatus, HomeBinding, Name, Position, Transport, TravelGoal, TravelProgress,
};
use crate::config::SimConfig;
use crate::grid::TerrainGrid;
use crate::locations::LocationRegistry;

/// Bumped whenever the snapshot layout changes shape.
const SAVE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    day: u64,
    config: SimConfig,
    grid: TerrainGrid,
    locations: LocationRegistry,
    agents: Vec<SerializableAgent>,
}

/// One agent flattened out of the ECS.
#[derive(Default, Serialize, Deserialize)]
struct SerializableAgent {
    name: Option<Name>,
    kind: Option<AgentKind>,
    position: Option<Position>,
    status: Option<AgentStatus>,
    transport: Option<Transport>,
    progress: Option<TravelProgress>,
    goal: Option<TravelGoal>,
    home: Option<HomeBinding>,
}

/// What a snapshot reconstructs to.
pub struct LoadedSimulation {
    pub world: World,
    pub day: u64,
    pub config: SimConfig,
    pub grid: TerrainGrid,
    pub locations: LocationRegistry,
}

#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::Io(err)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(err: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(err)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(err) => write!(f, "io error: {}", err),
            SaveError::Bincode(err) => write!(f, "serialization error: {}", err),
            SaveError::VersionMismatch { expected, found } => {
                write!(f, "save version mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for SaveError {}

fn serialize_agents(world: &World) -> Vec<SerializableAgent> {
    let mut agents = Vec::new();
    for entity_ref in world.iter() {
        let mut agent = SerializableAgent::default();
        if let Some(c) = entity_ref.get::<&Name>() {
            agent.name = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&AgentKind>() {
            agent.kind = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Position>() {
            agent.position = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&AgentStatus>() {
            agent.status = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&Transport>() {
            agent.transport = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&TravelProgress>() {
            agent.progress = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&TravelGoal>() {
            agent.goal = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&HomeBinding>() {
            agent.home = Some((*c).clone());
        }
        agents.push(agent);
    }
    agents
}

fn spawn_agent(world: &mut World, agent: SerializableAgent) {
    let entity = world.spawn(());
    if let Some(c) = agent.name {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = agent.kind {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = agent.position {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = agent.status {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = agent.transport {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = agent.progress {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = agent.goal {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = agent.home {
        let _ = world.insert_one(entity, c);
    }
}

/// Write a full snapshot to the writer.
pub fn save_simulation<W: Write>(
    mut writer: W,
    world: &World,
    day: u64,
    config: &SimConfig,
    grid: &TerrainGrid,
    locations: &LocationRegistry,
) -> Result<(), SaveError> {
    let data = SaveData {
        version: SAVE_VERSION,
        day,
        config: config.clone(),
        grid: grid.clone(),
        locations: locations.clone(),
        agents: serialize_agents(world),
    };
    let bytes = bincode::serialize(&data)?;
    writer.write_all(&bytes)?;
    log::info!("saved day {} with {} agent(s)", day, data.agents.len());
    Ok(())
}

/// Read a snapshot back. Fails on any version other than the current one.
pub fn load_simulation<R: Read>(mut reader: R) -> Result<LoadedSimulation, SaveError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let data: SaveData = bincode::deserialize(&bytes)?;

    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }

    let mut world = World::new();
    let agent_count = data.agents.len();
    for agent in data.agents {
        spawn_agent(&mut world, agent);
    }
    log::info!("loaded day {} with {} agent(s)", data.day, agent_count);

    Ok(LoadedSimulation {
        world,
        day: data.day,
        config: data.config,
        grid: data.grid,
        locations: data.locations,
    })
}
