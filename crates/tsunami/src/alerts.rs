//! Batch screening of recent earthquakes into tsunami alerts, and the
//! overview statistics shown above the alert list.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::arrivals::{estimate_arrivals_with, ArrivalEstimate, CoastalCityCatalog};
use crate::config::ArrivalSettings;
use crate::earthquake::EarthquakeEvent;
use crate::error::EngineError;
use crate::geo::GeoPoint;
use crate::threat::{classify, threat_distribution, ThreatLevel};

const MS_PER_HOUR: i64 = 3_600_000;

/// Which earthquakes raise an alert and which count as recent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Minimum magnitude for a tsunami alert.
    pub tsunami_magnitude: f64,
    /// Deeper events never raise an alert (km).
    pub max_depth_km: f64,
    /// Events older than this, relative to `now`, are ignored (hours).
    pub window_hours: u32,
    /// Minimum magnitude counted as significant in the overview.
    pub min_magnitude: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            tsunami_magnitude: 7.0,
            max_depth_km: 100.0,
            window_hours: 24,
            min_magnitude: 6.5,
        }
    }
}

impl AlertThresholds {
    /// Within the recency window. Future timestamps count as recent.
    pub fn is_recent(&self, event: &EarthquakeEvent, now_ms: i64) -> bool {
        event.timestamp_ms >= now_ms - i64::from(self.window_hours) * MS_PER_HOUR
    }

    /// Magnitude and depth both inside the alert limits.
    pub fn is_tsunami_risk(&self, event: &EarthquakeEvent) -> bool {
        event.magnitude >= self.tsunami_magnitude && event.depth_km <= self.max_depth_km
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsunamiAlert {
    pub id: String,
    pub earthquake_id: String,
    pub threat: ThreatLevel,
    pub magnitude: f64,
    pub depth_km: f64,
    pub place: String,
    pub location: GeoPoint,
    pub timestamp_ms: i64,
    pub arrivals: Vec<ArrivalEstimate>,
}

impl TsunamiAlert {
    pub fn from_event(
        event: &EarthquakeEvent,
        catalog: &CoastalCityCatalog,
        arrival_settings: &ArrivalSettings,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            id: format!("tsunami_{}", event.id),
            earthquake_id: event.id.clone(),
            threat: classify(event),
            magnitude: event.magnitude,
            depth_km: event.depth_km,
            place: event.place_label().to_string(),
            location: event.epicenter(),
            timestamp_ms: event.timestamp_ms,
            arrivals: estimate_arrivals_with(event, catalog.cities(), arrival_settings)?,
        })
    }
}

/// Alerts for every recent, shallow-enough, strong-enough event.
///
/// Events failing validation are skipped with a warning rather than failing
/// the batch; invalid `arrival_settings` fail it. Ordered by threat (most
/// severe first), then magnitude, then id.
pub fn screen_alerts(
    events: &[EarthquakeEvent],
    thresholds: &AlertThresholds,
    now_ms: i64,
    catalog: &CoastalCityCatalog,
    arrival_settings: &ArrivalSettings,
) -> Result<Vec<TsunamiAlert>, EngineError> {
    arrival_settings.validate()?;
    let mut alerts = valid_events(events)
        .filter(|e| thresholds.is_recent(e, now_ms) && thresholds.is_tsunami_risk(e))
        .map(|e| TsunamiAlert::from_event(e, catalog, arrival_settings))
        .collect::<Result<Vec<_>, _>>()?;

    alerts.sort_by(|a, b| {
        b.threat
            .cmp(&a.threat)
            .then_with(|| b.magnitude.total_cmp(&a.magnitude))
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(alerts)
}

fn valid_events(events: &[EarthquakeEvent]) -> impl Iterator<Item = &EarthquakeEvent> {
    events.iter().filter(|e| match e.validate() {
        Ok(()) => true,
        Err(err) => {
            warn!("Skipping earthquake {}: {}", e.id, err);
            false
        }
    })
}

// =============================================================================
// Overview
// =============================================================================

/// Headline numbers over the recent window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeismicOverview {
    pub recent_count: usize,
    /// Recent events at or above `min_magnitude`.
    pub significant_count: usize,
    /// Recent events inside the tsunami alert limits.
    pub tsunami_risk_count: usize,
    /// 0 when there are no recent events.
    pub max_magnitude: f64,
    pub threat_distribution: BTreeMap<ThreatLevel, usize>,
    /// Recent tsunami-risk events classified High or Extreme, i.e. the
    /// screened alerts that count as active.
    pub active_alerts: usize,
}

impl SeismicOverview {
    pub fn from_events(events: &[EarthquakeEvent], thresholds: &AlertThresholds, now_ms: i64) -> Self {
        let recent: Vec<&EarthquakeEvent> = valid_events(events)
            .filter(|e| thresholds.is_recent(e, now_ms))
            .collect();

        let threat_distribution = threat_distribution(recent.iter().copied());
        let active_alerts = recent
            .iter()
            .filter(|e| thresholds.is_tsunami_risk(e) && classify(e).is_alerting())
            .count();

        Self {
            recent_count: recent.len(),
            significant_count: recent
                .iter()
                .filter(|e| e.magnitude >= thresholds.min_magnitude)
                .count(),
            tsunami_risk_count: recent
                .iter()
                .filter(|e| thresholds.is_tsunami_risk(e))
                .count(),
            max_magnitude: recent.iter().map(|e| e.magnitude).fold(0.0, f64::max),
            threat_distribution,
            active_alerts,
        }
    }
}
