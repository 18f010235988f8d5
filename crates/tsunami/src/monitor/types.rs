use bevy::prelude::*;
use bevy::tasks::Task;
use serde::{Deserialize, Serialize};

use crate::alerts::{AlertThresholds, TsunamiAlert};
use crate::assessment::{AssessmentPolicy, TsunamiAssessment};
use crate::earthquake::EarthquakeEvent;
use crate::error::EngineError;
use crate::propagation::{CancellationToken, RunStatus, SimulationOutcome};
use crate::summary::SimulationSummary;

/// Alerts kept in the feed; older ones are dropped first.
pub const MAX_FEED_ALERTS: usize = 50;

/// A new seismic record from the ingestion layer.
#[derive(Event, Debug, Clone)]
pub struct EarthquakeReported(pub EarthquakeEvent);

/// Fired when a reported earthquake is inside the tsunami alert limits.
#[derive(Event, Debug, Clone)]
pub struct TsunamiAlertRaised(pub TsunamiAlert);

/// Fired when an escalated event's simulation completes or is cut short.
#[derive(Event, Debug, Clone)]
pub struct SimulationFinished {
    pub event_id: String,
    pub status: RunStatus,
    pub summary: SimulationSummary,
}

/// Assessment policy and alert limits used by the monitor systems.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    pub policy: AssessmentPolicy,
    pub thresholds: AlertThresholds,
}

/// Most recent assessment, replaced whenever a new valid earthquake arrives.
///
/// The simulation field stays `None` while `simulation_pending` is set; the
/// result is attached when the background run finishes.
#[derive(Resource, Debug, Clone, Default)]
pub struct LatestAssessment {
    pub assessment: Option<TsunamiAssessment>,
    pub simulation_pending: bool,
}

impl LatestAssessment {
    pub fn event_id(&self) -> Option<&str> {
        self.assessment.as_ref().map(|a| a.event.id.as_str())
    }
}

/// Rolling list of raised alerts, newest last.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertFeed {
    pub alerts: Vec<TsunamiAlert>,
}

impl AlertFeed {
    pub fn push(&mut self, alert: TsunamiAlert) {
        self.alerts.push(alert);
        if self.alerts.len() > MAX_FEED_ALERTS {
            let excess = self.alerts.len() - MAX_FEED_ALERTS;
            self.alerts = self.alerts.split_off(excess);
        }
    }

    /// Alerts at High or Extreme.
    pub fn active_count(&self) -> usize {
        self.alerts.iter().filter(|a| a.threat.is_alerting()).count()
    }
}

/// Running counters for the monitor, for diagnostics panels.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorStats {
    pub events_assessed: u32,
    pub events_rejected: u32,
    pub simulations_started: u32,
    pub simulations_superseded: u32,
    pub simulations_completed: u32,
}

/// The simulation currently running on the async compute pool.
#[derive(Resource, Default)]
pub struct SimulationJob {
    pub(crate) running: Option<RunningSimulation>,
}

impl SimulationJob {
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn event_id(&self) -> Option<&str> {
        self.running.as_ref().map(|r| r.event_id.as_str())
    }
}

pub(crate) struct RunningSimulation {
    pub event_id: String,
    pub token: CancellationToken,
    pub task: Task<Result<SimulationOutcome, EngineError>>,
}
