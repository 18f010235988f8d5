//! Wave arrival estimates at reference coastal cities.
//!
//! Travel time assumes a single open-ocean wave speed for every path
//! (`config::ocean_wave_speed_kmh`). Bathymetry is not modelled, so coastal
//! shoaling and land obstruction are ignored.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ArrivalSettings;
use crate::earthquake::EarthquakeEvent;
use crate::error::EngineError;
use crate::geo::{self, GeoPoint};

// =============================================================================
// Reference data
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoastalCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Display only; never used in any computation.
    pub population: Option<u64>,
}

impl CoastalCity {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            population: None,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Immutable set of coastal reference cities.
///
/// Constructed once by the caller and passed into the estimator; tests swap in
/// their own fixtures. Also usable as an ECS resource by the monitor plugin.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoastalCityCatalog {
    cities: Vec<CoastalCity>,
}

impl CoastalCityCatalog {
    pub fn new(cities: Vec<CoastalCity>) -> Self {
        Self { cities }
    }

    /// Major Pacific-rim cities watched by the monitoring dashboard.
    pub fn pacific_default() -> Self {
        Self::new(vec![
            CoastalCity::new("Honolulu, HI", 21.3099, -157.8581),
            CoastalCity::new("Los Angeles, CA", 34.0522, -118.2437),
            CoastalCity::new("San Francisco, CA", 37.7749, -122.4194),
            CoastalCity::new("Seattle, WA", 47.6062, -122.3321),
            CoastalCity::new("Tokyo, Japan", 35.6762, 139.6503),
            CoastalCity::new("Manila, Philippines", 14.5995, 120.9842),
            CoastalCity::new("Sydney, Australia", -33.8688, 151.2093),
            CoastalCity::new("Vladivostok, Russia", 43.1056, 131.8735),
        ])
    }

    pub fn cities(&self) -> &[CoastalCity] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

// =============================================================================
// Estimates
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalEstimate {
    pub city: String,
    pub distance_km: f64,
    pub estimated_minutes: f64,
    pub travel_speed_kmh: f64,
    /// Direction from the epicenter to the city, for display.
    pub bearing_degrees: f64,
    /// Event time plus travel time (Unix ms).
    pub arrival_timestamp_ms: i64,
}

/// Arrival estimates with the default wave speed and relevance radius.
pub fn estimate_arrivals(event: &EarthquakeEvent, cities: &[CoastalCity]) -> Vec<ArrivalEstimate> {
    arrivals_within(event, cities, &ArrivalSettings::default())
}

/// One estimate per city within `settings.max_relevant_radius_km`, nearest first.
/// Equal distances are ordered by city name so the output is stable.
///
/// Fails with `InvalidConfig` if the speed or radius is not finite and positive.
pub fn estimate_arrivals_with(
    event: &EarthquakeEvent,
    cities: &[CoastalCity],
    settings: &ArrivalSettings,
) -> Result<Vec<ArrivalEstimate>, EngineError> {
    settings.validate()?;
    Ok(arrivals_within(event, cities, settings))
}

fn arrivals_within(
    event: &EarthquakeEvent,
    cities: &[CoastalCity],
    settings: &ArrivalSettings,
) -> Vec<ArrivalEstimate> {
    let epicenter = event.epicenter();
    let mut estimates: Vec<ArrivalEstimate> = cities
        .iter()
        .filter_map(|city| {
            let distance_km = geo::distance_km(epicenter, city.location());
            if distance_km > settings.max_relevant_radius_km {
                return None;
            }
            let estimated_minutes = travel_minutes(distance_km, settings.travel_speed_kmh);
            Some(ArrivalEstimate {
                city: city.name.clone(),
                distance_km,
                estimated_minutes,
                travel_speed_kmh: settings.travel_speed_kmh,
                bearing_degrees: geo::bearing_degrees(epicenter, city.location()),
                arrival_timestamp_ms: event.offset_timestamp_ms(estimated_minutes),
            })
        })
        .collect();

    estimates.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.city.cmp(&b.city))
    });

    let excluded = cities.len() - estimates.len();
    if excluded > 0 {
        debug!(
            "Arrival estimates for {}: {} of {} cities beyond {} km",
            event.id,
            excluded,
            cities.len(),
            settings.max_relevant_radius_km
        );
    }
    estimates
}

/// Minutes for the wave to cover `distance_km`. Zero distance is zero minutes.
pub fn travel_minutes(distance_km: f64, speed_kmh: f64) -> f64 {
    if distance_km <= 0.0 {
        return 0.0;
    }
    distance_km / speed_kmh * 60.0
}
