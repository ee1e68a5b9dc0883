//! Components every agent carries.

use overland_logic::coords::Coord;
use serde::{Deserialize, Serialize};

/// Display name of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Grid position of an agent. Always inside the terrain grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub cell: Coord,
}

impl Position {
    pub fn new(q: i32, r: i32) -> Self {
        Self {
            cell: Coord::new(q, r),
        }
    }
}

/// Whether the scheduler touches this agent at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Stopped,
}

impl AgentStatus {
    pub fn is_stopped(&self) -> bool {
        matches!(self, AgentStatus::Stopped)
    }
}

impl Default for AgentStatus {
    fn default() -> Self {
        AgentStatus::Active
    }
}

/// Movement points banked toward the next cell step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelProgress {
    pub points: f32,
}

/// Current destination. Present only while the agent has somewhere to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelGoal {
    pub target: Coord,
}
