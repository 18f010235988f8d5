//! Per-event assessment pipeline.
//!
//! Classification always runs. Arrival estimates and the propagation run only
//! happen once the threat reaches `AssessmentPolicy::min_level`, so minor
//! quakes cost a table lookup and nothing more.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::arrivals::{estimate_arrivals_with, ArrivalEstimate, CoastalCityCatalog};
use crate::config::{ArrivalSettings, SimulationConfig};
use crate::earthquake::EarthquakeEvent;
use crate::error::EngineError;
use crate::propagation::{run_simulation_cancellable, CancellationToken, SimulationOutcome};
use crate::threat::{classify, ThreatLevel};

/// Gates and settings for `assess`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentPolicy {
    /// Lowest threat level that triggers arrival estimates and simulation.
    pub min_level: ThreatLevel,
    pub arrivals: ArrivalSettings,
    pub simulation: SimulationConfig,
}

impl Default for AssessmentPolicy {
    fn default() -> Self {
        Self {
            min_level: ThreatLevel::Low,
            arrivals: ArrivalSettings::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsunamiAssessment {
    pub event: EarthquakeEvent,
    pub threat: ThreatLevel,
    /// Empty when the threat is below the policy's minimum.
    pub arrivals: Vec<ArrivalEstimate>,
    /// `None` when the threat is below the policy's minimum.
    pub simulation: Option<SimulationOutcome>,
}

impl TsunamiAssessment {
    /// Whether the downstream estimators ran for this event.
    pub fn was_escalated(&self) -> bool {
        self.simulation.is_some()
    }

    pub fn nearest_arrival(&self) -> Option<&ArrivalEstimate> {
        self.arrivals.first()
    }
}

/// Classifies `event` and, when severe enough, estimates arrivals and simulates.
pub fn assess(
    event: &EarthquakeEvent,
    catalog: &CoastalCityCatalog,
    policy: &AssessmentPolicy,
) -> Result<TsunamiAssessment, EngineError> {
    assess_cancellable(event, catalog, policy, &CancellationToken::new())
}

pub fn assess_cancellable(
    event: &EarthquakeEvent,
    catalog: &CoastalCityCatalog,
    policy: &AssessmentPolicy,
    cancel: &CancellationToken,
) -> Result<TsunamiAssessment, EngineError> {
    event.validate()?;
    let threat = classify(event);

    if threat < policy.min_level {
        debug!(
            "{} classified {}: below {}, not escalated",
            event.id, threat, policy.min_level
        );
        return Ok(TsunamiAssessment {
            event: event.clone(),
            threat,
            arrivals: Vec::new(),
            simulation: None,
        });
    }

    // Validate the simulation settings before doing any estimator work.
    policy.simulation.validate()?;
    let arrivals = estimate_arrivals_with(event, catalog.cities(), &policy.arrivals)?;
    let simulation = run_simulation_cancellable(event, &policy.simulation, cancel)?;

    info!(
        "{} (M{:.1}, {} km) classified {}: {} cities in range, max wave {:.2} m",
        event.id,
        event.magnitude,
        event.depth_km,
        threat,
        arrivals.len(),
        simulation.summary.max_wave_height_m
    );

    Ok(TsunamiAssessment {
        event: event.clone(),
        threat,
        arrivals,
        simulation: Some(simulation),
    })
}
