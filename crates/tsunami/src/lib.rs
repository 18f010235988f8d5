//! Tsunami threat assessment and wave-propagation simulation.
//!
//! The pure pipeline (`classify_threat`, `estimate_arrivals`, `run_simulation`,
//! `assess`) has no Bevy dependency beyond logging and can be called from any
//! thread. `TsunamiMonitorPlugin` wires it into a Bevy `App` for live feeds.

pub mod alerts;
pub mod arrivals;
pub mod assessment;
pub mod config;
pub mod earthquake;
pub mod error;
pub mod geo;
pub mod monitor;
pub mod propagation;
pub mod summary;
pub mod threat;

#[cfg(test)]
pub mod test_harness;

pub use alerts::{screen_alerts, AlertThresholds, SeismicOverview, TsunamiAlert};
pub use arrivals::{estimate_arrivals, ArrivalEstimate, CoastalCity, CoastalCityCatalog};
pub use assessment::{assess, assess_cancellable, AssessmentPolicy, TsunamiAssessment};
pub use config::{ArrivalSettings, SimulationConfig};
pub use earthquake::EarthquakeEvent;
pub use error::EngineError;
pub use geo::{distance_km, GeoPoint};
pub use monitor::{
    EarthquakeReported, LatestAssessment, MonitorSettings, TsunamiAlertRaised,
    TsunamiMonitorPlugin,
};
pub use propagation::{
    run_simulation, run_simulation_cancellable, CancellationToken, RunStatus, SimulationFrame,
    SimulationOutcome,
};
pub use summary::{summarize, SimulationSummary};
pub use threat::{classify as classify_threat, ThreatLevel};
