use std::collections::BTreeMap;

use crate::earthquake::EarthquakeEvent;

use super::types::ThreatLevel;

/// One classification row: the event matches when
/// `magnitude >= min_magnitude` and `depth_km <= max_depth_km`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatRule {
    pub min_magnitude: f64,
    pub max_depth_km: f64,
    pub level: ThreatLevel,
}

/// Evaluated top to bottom; the first matching row wins.
/// Anything that matches no row is `Minimal`.
pub const CLASSIFICATION_TABLE: [ThreatRule; 4] = [
    ThreatRule {
        min_magnitude: 8.0,
        max_depth_km: 100.0,
        level: ThreatLevel::Extreme,
    },
    ThreatRule {
        min_magnitude: 7.5,
        max_depth_km: 150.0,
        level: ThreatLevel::High,
    },
    ThreatRule {
        min_magnitude: 7.0,
        max_depth_km: 200.0,
        level: ThreatLevel::Medium,
    },
    ThreatRule {
        min_magnitude: 6.5,
        max_depth_km: f64::INFINITY,
        level: ThreatLevel::Low,
    },
];

/// Threat level for an earthquake record.
pub fn classify(event: &EarthquakeEvent) -> ThreatLevel {
    classify_parameters(event.magnitude, event.depth_km)
}

/// Threat level for a raw magnitude/depth pair.
pub fn classify_parameters(magnitude: f64, depth_km: f64) -> ThreatLevel {
    CLASSIFICATION_TABLE
        .iter()
        .find(|rule| magnitude >= rule.min_magnitude && depth_km <= rule.max_depth_km)
        .map_or(ThreatLevel::Minimal, |rule| rule.level)
}

/// Number of events per threat level. Every level has an entry, zero included.
pub fn threat_distribution<'a, I>(events: I) -> BTreeMap<ThreatLevel, usize>
where
    I: IntoIterator<Item = &'a EarthquakeEvent>,
{
    let mut counts: BTreeMap<ThreatLevel, usize> =
        ThreatLevel::ALL.iter().map(|&level| (level, 0)).collect();
    for event in events {
        *counts.entry(classify(event)).or_insert(0) += 1;
    }
    counts
}
