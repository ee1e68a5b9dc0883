//! Terrain categories and base traversal costs.

use serde::{Deserialize, Serialize};

use crate::constants::IMPASSABLE_COST;

/// Coarse terrain classification for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainCategory {
    Water,
    Ocean,
    Ice,
    Rock,
    Land,
    Vegetation,
    Camp,
    /// Off-map filler; no mode may ever enter it.
    Void,
}

impl TerrainCategory {
    /// Every category, for sweeps in tests and validation.
    pub const ALL: [TerrainCategory; 8] = [
        TerrainCategory::Water,
        TerrainCategory::Ocean,
        TerrainCategory::Ice,
        TerrainCategory::Rock,
        TerrainCategory::Land,
        TerrainCategory::Vegetation,
        TerrainCategory::Camp,
        TerrainCategory::Void,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TerrainCategory::Water => "water",
            TerrainCategory::Ocean => "ocean",
            TerrainCategory::Ice => "ice",
            TerrainCategory::Rock => "rock",
            TerrainCategory::Land => "land",
            TerrainCategory::Vegetation => "vegetation",
            TerrainCategory::Camp => "camp",
            TerrainCategory::Void => "void",
        }
    }
}

/// Base traversal cost per terrain category, in abstract cost units.
/// Transport modes scale these by their own cost factor. Any category whose
/// base cost reaches [`IMPASSABLE_COST`] is blocked for every mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainCosts {
    pub water: f32,
    pub ocean: f32,
    pub ice: f32,
    pub rock: f32,
    pub land: f32,
    pub vegetation: f32,
    pub camp: f32,
    pub void: f32,
}

impl Default for TerrainCosts {
    fn default() -> Self {
        Self {
            water: 3.0,
            ocean: 10.0,
            ice: 2.5,
            rock: 3.0,
            land: 1.0,
            vegetation: 1.5,
            camp: 0.5,
            void: 9999.0,
        }
    }
}

impl TerrainCosts {
    /// Base cost for a category.
    pub fn cost(&self, terrain: TerrainCategory) -> f32 {
        match terrain {
            TerrainCategory::Water => self.water,
            TerrainCategory::Ocean => self.ocean,
            TerrainCategory::Ice => self.ice,
            TerrainCategory::Rock => self.rock,
            TerrainCategory::Land => self.land,
            TerrainCategory::Vegetation => self.vegetation,
            TerrainCategory::Camp => self.camp,
            TerrainCategory::Void => self.void,
        }
    }

    /// Whether a category is blocked for every mode regardless of speed.
    pub fn is_impassable(&self, terrain: TerrainCategory) -> bool {
        self.cost(terrain) >= IMPASSABLE_COST
    }
}
