//! Physical constants and default settings shared by every engine component.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Mean Earth radius used for great-circle math (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Gravitational acceleration (m/s^2).
pub const GRAVITY_M_S2: f64 = 9.81;

/// Representative open-ocean depth used for the shallow-water wave speed (m).
/// Bathymetry is not modelled; every path uses this depth.
pub const AVERAGE_OCEAN_DEPTH_M: f64 = 4000.0;

/// Cities farther than this from the epicenter are dropped from arrival results.
pub const MAX_RELEVANT_RADIUS_KM: f64 = 20_000.0;

/// Upper bound on the initial wave height at the source (m).
pub const MAX_INITIAL_HEIGHT_M: f64 = 30.0;

/// A cell counts as affected once its height exceeds this (m).
pub const AFFECTED_HEIGHT_M: f32 = 0.5;

/// Duration of the propagating pulse at any one cell (minutes).
/// Front width in km is `travel_speed_kmh * FRONT_BAND_MINUTES / 60`.
pub const FRONT_BAND_MINUTES: f64 = 30.0;

/// E-folding time of the damping applied once the front has passed (minutes).
pub const POST_FRONT_DAMPING_MINUTES: f64 = 20.0;

/// Default bound on how far the grid reaches from the epicenter (km).
pub const DEFAULT_MAX_HALF_EXTENT_KM: f64 = 6000.0;

/// Grids with more cells than this are rejected instead of allocated.
pub const MAX_GRID_CELLS: usize = 4_000_000;

/// Runs needing more frames than this are rejected before any work is done.
pub const MAX_FRAMES: usize = 2_000;

/// Relative slack when counting whole steps in the horizon, so a horizon that
/// is an exact multiple of the step keeps its last frame despite rounding.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;

/// Open-ocean tsunami speed in km/h: `sqrt(g * depth)` converted from m/s.
pub fn ocean_wave_speed_kmh() -> f64 {
    (GRAVITY_M_S2 * AVERAGE_OCEAN_DEPTH_M).sqrt() * 3.6
}

// =============================================================================
// SimulationConfig
// =============================================================================

/// Caller-controlled bounds of one propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Spacing between grid nodes (km).
    pub grid_resolution_km: f64,
    /// Time between consecutive frames (minutes).
    pub time_step_minutes: f64,
    /// Last time offset simulated (minutes).
    pub horizon_minutes: f64,
    /// The grid covers the front's reach at the horizon, clipped to this (km).
    pub max_half_extent_km: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_resolution_km: 50.0,
            time_step_minutes: 10.0,
            horizon_minutes: 360.0,
            max_half_extent_km: DEFAULT_MAX_HALF_EXTENT_KM,
        }
    }
}

impl SimulationConfig {
    pub fn new(grid_resolution_km: f64, time_step_minutes: f64, horizon_minutes: f64) -> Self {
        Self {
            grid_resolution_km,
            time_step_minutes,
            horizon_minutes,
            ..Self::default()
        }
    }

    /// Every field must be finite and strictly positive, and the run must fit
    /// in `MAX_FRAMES`.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_positive("grid_resolution_km", self.grid_resolution_km)?;
        check_positive("time_step_minutes", self.time_step_minutes)?;
        check_positive("horizon_minutes", self.horizon_minutes)?;
        check_positive("max_half_extent_km", self.max_half_extent_km)?;

        let steps = self.whole_steps();
        if steps >= MAX_FRAMES as f64 {
            return Err(EngineError::TooManyFrames {
                frames: steps.min(usize::MAX as f64) as usize,
                limit: MAX_FRAMES,
            });
        }
        Ok(())
    }

    /// Number of frames a complete run produces: one at `t = 0` plus one per
    /// whole time step that fits in the horizon. Saturates for configs that
    /// `validate` rejects.
    pub fn frame_count(&self) -> usize {
        let steps = self.whole_steps();
        if steps.is_nan() {
            return 1;
        }
        (steps.min(usize::MAX as f64) as usize).saturating_add(1)
    }

    fn whole_steps(&self) -> f64 {
        (self.horizon_minutes / self.time_step_minutes * (1.0 + STEP_COUNT_TOLERANCE)).floor()
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig { field, value })
    }
}

// =============================================================================
// ArrivalSettings
// =============================================================================

/// Tunables for the arrival estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalSettings {
    pub travel_speed_kmh: f64,
    pub max_relevant_radius_km: f64,
}

impl Default for ArrivalSettings {
    fn default() -> Self {
        Self {
            travel_speed_kmh: ocean_wave_speed_kmh(),
            max_relevant_radius_km: MAX_RELEVANT_RADIUS_KM,
        }
    }
}

impl ArrivalSettings {
    /// Speed and radius must both be finite and strictly positive.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_positive("travel_speed_kmh", self.travel_speed_kmh)?;
        check_positive("max_relevant_radius_km", self.max_relevant_radius_km)?;
        Ok(())
    }
}
