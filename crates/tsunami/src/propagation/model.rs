use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::{
    ocean_wave_speed_kmh, FRONT_BAND_MINUTES, MAX_INITIAL_HEIGHT_M, POST_FRONT_DAMPING_MINUTES,
};
use crate::earthquake::EarthquakeEvent;
use crate::threat::ThreatLevel;

/// Radially symmetric decaying pulse emitted from the epicenter.
///
/// A cell at distance `d` stays flat until the front reaches it at
/// `d / speed`. For the next `FRONT_BAND_MINUTES` it carries a crest followed by
/// a trough, damped exponentially with time since the front passed and scaled
/// by cylindrical spreading `1 / sqrt(d)`. After the band it is flat again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSource {
    pub initial_height_m: f64,
    pub travel_speed_kmh: f64,
    /// Distances below this are treated as this for the spreading term,
    /// so the epicenter keeps the full source height.
    pub min_distance_km: f64,
}

impl WaveSource {
    /// Source for an event on a grid of the given spacing.
    pub fn for_event(event: &EarthquakeEvent, threat: ThreatLevel, grid_resolution_km: f64) -> Self {
        Self {
            initial_height_m: Self::initial_height_m(event.magnitude, threat),
            travel_speed_kmh: ocean_wave_speed_kmh(),
            min_distance_km: grid_resolution_km,
        }
    }

    /// `2^(magnitude - 6)` scaled by the threat level's energy factor,
    /// capped at `MAX_INITIAL_HEIGHT_M`.
    pub fn initial_height_m(magnitude: f64, threat: ThreatLevel) -> f64 {
        (2f64.powf(magnitude - 6.0) * threat.energy_factor()).min(MAX_INITIAL_HEIGHT_M)
    }

    /// Radius reached by the leading edge after `t_minutes` (km).
    pub fn front_radius_km(&self, t_minutes: f64) -> f64 {
        self.travel_speed_kmh * t_minutes / 60.0
    }

    /// Minutes until the leading edge reaches `distance_km`.
    pub fn arrival_minutes(&self, distance_km: f64) -> f64 {
        distance_km / self.travel_speed_kmh * 60.0
    }

    /// Peak amplitude the pulse carries at `distance_km`.
    pub fn amplitude_at(&self, distance_km: f64) -> f64 {
        let d = distance_km.max(self.min_distance_km);
        self.initial_height_m * (self.min_distance_km / d).sqrt()
    }

    /// Signed surface height at `distance_km` after `t_minutes`.
    pub fn height_at(&self, distance_km: f64, t_minutes: f64) -> f64 {
        let since_front = t_minutes - self.arrival_minutes(distance_km);
        if !(0.0..=FRONT_BAND_MINUTES).contains(&since_front) {
            return 0.0;
        }
        let s = since_front / FRONT_BAND_MINUTES;
        let shape = (PI * s).cos() * (1.0 - s);
        let damping = (-since_front / POST_FRONT_DAMPING_MINUTES).exp();
        self.amplitude_at(distance_km) * shape * damping
    }

    /// Width of the moving band of disturbed water (km).
    pub fn front_width_km(&self) -> f64 {
        self.front_radius_km(FRONT_BAND_MINUTES)
    }
}
