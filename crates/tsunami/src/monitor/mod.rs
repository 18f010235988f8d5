//! Bevy integration for a live monitoring dashboard.
//!
//! Earthquakes arrive as `EarthquakeReported` events from the ingestion layer.
//! `assess_reported_earthquakes` classifies each one, publishes arrival
//! estimates and alerts immediately, and hands escalated events to the
//! `AsyncComputeTaskPool` for simulation. A newer escalated event cancels the
//! run in flight, so the dashboard never waits on a stale simulation.
//! `collect_simulation_results` polls the task and attaches the outcome to
//! `LatestAssessment` once it is ready.

mod systems;
mod types;

pub use systems::{assess_reported_earthquakes, collect_simulation_results, TsunamiMonitorPlugin};
pub use types::{
    AlertFeed, EarthquakeReported, LatestAssessment, MonitorSettings, MonitorStats,
    SimulationFinished, SimulationJob, TsunamiAlertRaised, MAX_FEED_ALERTS,
};
