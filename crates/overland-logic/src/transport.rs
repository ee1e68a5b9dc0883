//! Transport modes and the mode catalog.
//!
//! A mode is a named movement profile: a speed multiplier, a set of terrain
//! it can never enter, a cost factor applied to terrain base costs, and an
//! optional equipment flag gating its use. The catalog resolves mode names
//! for agents: world-defined custom entries shadow the built-in table, and
//! unknown names fall back to walking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::terrain::TerrainCategory;

/// Name of the fallback mode every agent can always use.
pub const ON_FOOT: &str = "on_foot";

/// A named movement profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportMode {
    /// Speed multiplier relative to walking.
    pub speed: f32,
    /// Terrain this mode can never enter.
    pub restricted: Vec<TerrainCategory>,
    /// Multiplier applied to terrain base cost; below 1.0 means the mode
    /// handles rough ground better than feet do.
    pub cost_factor: f32,
    /// Equipment flag the agent must carry to use the mode. Without it the
    /// agent travels on foot instead.
    #[serde(default)]
    pub requires_equipment: Option<String>,
}

impl TransportMode {
    pub fn new(speed: f32, restricted: Vec<TerrainCategory>, cost_factor: f32) -> Self {
        Self {
            speed,
            restricted,
            cost_factor,
            requires_equipment: None,
        }
    }

    pub fn with_equipment(mut self, flag: impl Into<String>) -> Self {
        self.requires_equipment = Some(flag.into());
        self
    }

    pub fn is_restricted(&self, terrain: TerrainCategory) -> bool {
        self.restricted.contains(&terrain)
    }

    /// Whether the mode's numerics can produce a usable rate. Speed and
    /// cost factor must both be positive and finite; anything else divides
    /// the rate model into nonsense.
    pub fn is_valid(&self) -> bool {
        self.speed.is_finite()
            && self.speed > 0.0
            && self.cost_factor.is_finite()
            && self.cost_factor > 0.0
    }
}

/// Mode catalog: built-in defaults plus world-defined custom entries.
///
/// Only the custom entries are serialized; the built-in table is part of the
/// program, not the world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportCatalog {
    custom: HashMap<String, TransportMode>,
}

impl TransportCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in profile for a name, if there is one.
    pub fn builtin(name: &str) -> Option<TransportMode> {
        match name {
            "on_foot" => Some(Self::on_foot()),
            "horse" => Some(TransportMode::new(
                1.8,
                vec![
                    TerrainCategory::Ocean,
                    TerrainCategory::Water,
                    TerrainCategory::Rock,
                ],
                1.0,
            )),
            "wagon" => Some(TransportMode::new(
                0.6,
                vec![
                    TerrainCategory::Ocean,
                    TerrainCategory::Water,
                    TerrainCategory::Rock,
                    TerrainCategory::Vegetation,
                ],
                1.2,
            )),
            "river_boat" => Some(
                TransportMode::new(
                    1.2,
                    vec![
                        TerrainCategory::Land,
                        TerrainCategory::Vegetation,
                        TerrainCategory::Ice,
                        TerrainCategory::Rock,
                        TerrainCategory::Ocean,
                    ],
                    0.5,
                )
                .with_equipment("boat"),
            ),
            "ocean_ship" => Some(
                TransportMode::new(
                    1.5,
                    vec![
                        TerrainCategory::Land,
                        TerrainCategory::Vegetation,
                        TerrainCategory::Ice,
                        TerrainCategory::Rock,
                    ],
                    0.1,
                )
                .with_equipment("ship"),
            ),
            "flight" => Some(TransportMode::new(3.0, Vec::new(), 0.1)),
            _ => None,
        }
    }

    /// The fallback walking profile: ordinary speed, blocked only by open
    /// ocean (fording rivers on foot is slow but possible).
    pub fn on_foot() -> TransportMode {
        TransportMode::new(1.0, vec![TerrainCategory::Ocean], 1.0)
    }

    /// Register a world-defined mode. Reusing a built-in name shadows the
    /// built-in profile.
    pub fn define(&mut self, name: impl Into<String>, mode: TransportMode) {
        self.custom.insert(name.into(), mode);
    }

    /// World-defined entries only.
    pub fn custom_modes(&self) -> &HashMap<String, TransportMode> {
        &self.custom
    }

    /// Whether a name resolves to something other than the unknown-name
    /// fallback.
    pub fn contains(&self, name: &str) -> bool {
        self.custom.contains_key(name) || Self::builtin(name).is_some()
    }

    /// Resolve a mode name: custom entries first, then built-ins, then the
    /// walking fallback.
    pub fn resolve(&self, name: &str) -> TransportMode {
        if let Some(mode) = self.custom.get(name) {
            return mode.clone();
        }
        Self::builtin(name).unwrap_or_else(Self::on_foot)
    }

    /// The mode an agent actually travels with today. A temporary override
    /// is consulted before the assigned mode, and a mode whose equipment
    /// flag the agent does not carry degrades to walking.
    pub fn effective_mode(
        &self,
        assigned: &str,
        override_mode: Option<&str>,
        equipment: &[String],
    ) -> TransportMode {
        let name = override_mode.unwrap_or(assigned);
        let mode = self.resolve(name);
        match &mode.requires_equipment {
            Some(flag) if !equipment.iter().any(|e| e == flag) => Self::on_foot(),
            _ => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_resolves_to_walking() {
        let catalog = TransportCatalog::new();
        assert_eq!(catalog.resolve("dragon"), TransportCatalog::on_foot());
    }

    #[test]
    fn degenerate_numerics_are_invalid() {
        assert!(TransportMode::new(1.0, vec![], 1.0).is_valid());
        assert!(!TransportMode::new(0.0, vec![], 1.0).is_valid());
        assert!(!TransportMode::new(1.0, vec![], 0.0).is_valid());
        assert!(!TransportMode::new(-2.0, vec![], 1.0).is_valid());
        assert!(!TransportMode::new(1.0, vec![], f32::INFINITY).is_valid());
        assert!(!TransportMode::new(f32::NAN, vec![], 1.0).is_valid());
    }

    #[test]
    fn custom_entry_shadows_builtin() {
        let mut catalog = TransportCatalog::new();
        let fast_horse = TransportMode::new(2.5, vec![TerrainCategory::Ocean], 0.9);
        catalog.define("horse", fast_horse.clone());
        assert_eq!(catalog.resolve("horse"), fast_horse);
        // Other built-ins are untouched.
        assert_eq!(catalog.resolve("wagon").speed, 0.6);
    }

    #[test]
    fn contains_covers_builtins_and_custom() {
        let mut catalog = TransportCatalog::new();
        assert!(catalog.contains("horse"));
        assert!(!catalog.contains("sled"));
        catalog.define("sled", TransportMode::new(1.1, vec![], 0.8));
        assert!(catalog.contains("sled"));
    }

    #[test]
    fn equipment_gate_degrades_to_walking() {
        let catalog = TransportCatalog::new();
        let no_gear: &[String] = &[];
        let mode = catalog.effective_mode("ocean_ship", None, no_gear);
        assert_eq!(mode, TransportCatalog::on_foot());

        let gear = vec!["ship".to_string()];
        let mode = catalog.effective_mode("ocean_ship", None, &gear);
        assert_eq!(mode.speed, 1.5);
    }

    #[test]
    fn override_beats_assigned_mode() {
        let catalog = TransportCatalog::new();
        let mode = catalog.effective_mode("on_foot", Some("horse"), &[]);
        assert_eq!(mode.speed, 1.8);
    }

    #[test]
    fn override_still_subject_to_equipment_gate() {
        let catalog = TransportCatalog::new();
        let mode = catalog.effective_mode("horse", Some("river_boat"), &[]);
        assert_eq!(mode, TransportCatalog::on_foot());
    }
}
