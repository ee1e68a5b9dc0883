//! Agent kinds and travel-related agent state.

use overland_logic::transport::ON_FOOT;
use serde::{Deserialize, Serialize};

/// What kind of agent an entity is. The declaration order doubles as the
/// scheduler's processing order: npcs, then groups, then players.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Autonomous single traveler. Picks its own goals.
    Npc,
    /// Autonomous traveling party. Same policy as an npc.
    Group,
    /// Player-controlled agent. Never receives automatic goals.
    Player,
}

impl AgentKind {
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Npc => "npc",
            AgentKind::Group => "group",
            AgentKind::Player => "player",
        }
    }

    /// Whether this kind picks its own goals.
    pub fn is_autonomous(&self) -> bool {
        !matches!(self, AgentKind::Player)
    }
}

/// Transport selection for an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    /// Assigned mode name, resolved through the catalog at use time.
    pub mode: String,
    /// Temporary mode consulted before the assigned one.
    pub override_mode: Option<String>,
    /// Equipment flags that unlock gated modes.
    pub equipment: Vec<String>,
}

impl Transport {
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            override_mode: None,
            equipment: Vec::new(),
        }
    }

    pub fn with_equipment(mut self, flag: impl Into<String>) -> Self {
        self.equipment.push(flag.into());
        self
    }

    pub fn has_equipment(&self, flag: &str) -> bool {
        self.equipment.iter().any(|e| e == flag)
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(ON_FOOT)
    }
}

/// Periodic-return policy tying an agent to a named world location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeBinding {
    /// Name looked up in the world's location registry. A name that no
    /// longer resolves simply never comes due.
    pub location: String,
    /// Visit cadence in days.
    pub return_interval_days: u32,
    /// Days since the agent last stood at home.
    pub days_since_home: u32,
}

impl HomeBinding {
    pub fn new(location: impl Into<String>, return_interval_days: u32) -> Self {
        Self {
            location: location.into(),
            return_interval_days,
            days_since_home: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_processing_order() {
        assert!(AgentKind::Npc < AgentKind::Group);
        assert!(AgentKind::Group < AgentKind::Player);
    }

    #[test]
    fn test_only_players_are_driven_externally() {
        assert!(AgentKind::Npc.is_autonomous());
        assert!(AgentKind::Group.is_autonomous());
        assert!(!AgentKind::Player.is_autonomous());
    }

    #[test]
    fn test_transport_defaults_to_walking() {
        let transport = Transport::default();
        assert_eq!(transport.mode, "on_foot");
        assert!(transport.override_mode.is_none());
        assert!(transport.equipment.is_empty());
    }

    #[test]
    fn test_equipment_builder() {
        let transport = Transport::new("ocean_ship").with_equipment("ship");
        assert!(transport.has_equipment("ship"));
        assert!(!transport.has_equipment("boat"));
    }

    #[test]
    fn test_fresh_binding_counter_is_zero() {
        let binding = HomeBinding::new("Riverside", 7);
        assert_eq!(binding.days_since_home, 0);
        assert_eq!(binding.return_interval_days, 7);
    }
}
