//! Movement-point rate model.
//!
//! Turns a (transport mode, terrain) pair into movement points earned per
//! day, in three steps:
//!
//! 1. Terrain on the mode's restricted list yields 0.
//! 2. Terrain whose base cost reaches the impassable threshold yields 0
//!    for every mode, whatever its cost factor.
//! 3. Otherwise `km_per_day = (base_daily_km * speed) / (base_cost *
//!    cost_factor)`, normalized to points via the cell width and the daily
//!    point maximum.
//!
//! A rate of 0 means the agent cannot enter the terrain at all. Mode
//! numerics that would push the formula to a non-finite value also yield
//! 0; [`TransportMode::is_valid`] is the load-time check for them.

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_DAILY_KM, CELL_WIDTH_KM, DAILY_MAX_POINTS, IMPASSABLE_COST};
use crate::terrain::{TerrainCategory, TerrainCosts};
use crate::transport::TransportMode;

/// Distance and movement-point scale constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelScale {
    /// Kilometers a walker covers per day on cost-1.0 terrain.
    pub base_daily_km: f32,
    /// Width of one grid cell in kilometers.
    pub cell_width_km: f32,
    /// Points needed to cross into the next cell.
    pub daily_max_points: f32,
}

impl Default for TravelScale {
    fn default() -> Self {
        Self {
            base_daily_km: BASE_DAILY_KM,
            cell_width_km: CELL_WIDTH_KM,
            daily_max_points: DAILY_MAX_POINTS,
        }
    }
}

/// Movement points per day the mode earns on this terrain; 0 when the
/// terrain cannot be entered.
pub fn movement_rate(
    mode: &TransportMode,
    terrain: TerrainCategory,
    costs: &TerrainCosts,
    scale: &TravelScale,
) -> f32 {
    if mode.is_restricted(terrain) {
        return 0.0;
    }
    let base_cost = costs.cost(terrain);
    if base_cost >= IMPASSABLE_COST {
        return 0.0;
    }
    let km_per_day = (scale.base_daily_km * mode.speed) / (base_cost * mode.cost_factor);
    let points = (km_per_day / scale.cell_width_km) * scale.daily_max_points;
    // A zero cost factor or an overflowing speed would send the result to
    // infinity; such a mode reads as unable to enter anything.
    if points.is_finite() {
        points
    } else {
        0.0
    }
}
