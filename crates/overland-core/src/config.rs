//! Immutable simulation configuration.

use std::fmt;

use overland_logic::constants::{DEFAULT_ASTAR_BUDGET, DEFAULT_WANDER_ATTEMPTS};
use overland_logic::rate::TravelScale;
use overland_logic::terrain::TerrainCosts;
use overland_logic::transport::TransportCatalog;
use serde::{Deserialize, Serialize};

/// Seed used when a world does not pick its own. Fixed so that unseeded
/// runs still reproduce.
pub const DEFAULT_SEED: u64 = 42;

/// Every tunable the engine reads. Built once before the simulation starts
/// and never mutated mid-run; world files fold their custom transport
/// entries in before the engine is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Base traversal cost per terrain category.
    pub terrain_costs: TerrainCosts,
    /// Transport modes available to agents.
    pub transports: TransportCatalog,
    /// Distance and movement-point scale constants.
    pub scale: TravelScale,
    /// Pathfinder node-expansion budget.
    pub astar_budget: u32,
    /// Random cells sampled when rolling a wander goal.
    pub wander_attempts: u32,
    /// Seed for the simulation's random source.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            terrain_costs: TerrainCosts::default(),
            transports: TransportCatalog::default(),
            scale: TravelScale::default(),
            astar_budget: DEFAULT_ASTAR_BUDGET,
            wander_attempts: DEFAULT_WANDER_ATTEMPTS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Rejected configuration input.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    /// A custom transport whose numerics cannot produce a usable rate.
    InvalidTransport { mode: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(err) => write!(f, "configuration is not valid json: {}", err),
            ConfigError::InvalidTransport { mode } => {
                write!(
                    f,
                    "transport '{}' needs a positive, finite speed and cost factor",
                    mode
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SimConfig {
    /// Parse a configuration from JSON. Missing fields take defaults, so a
    /// world only states what it changes. Custom transports with numerics
    /// the rate model cannot use are rejected here, not at first use.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every custom transport entry must pass
    /// [`TransportMode::is_valid`](overland_logic::transport::TransportMode::is_valid).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, mode) in self.transports.custom_modes() {
            if !mode.is_valid() {
                return Err(ConfigError::InvalidTransport { mode: name.clone() });
            }
        }
        Ok(())
    }
}
