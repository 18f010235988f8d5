//! # TestMonitor: headless harness for the monitoring plugin
//!
//! Wraps `bevy::app::App` + `MinimalPlugins` + `TsunamiMonitorPlugin` so tests
//! can report earthquakes, drive updates, and inspect resources without a
//! window.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;

use crate::alerts::TsunamiAlert;
use crate::arrivals::CoastalCityCatalog;
use crate::assessment::TsunamiAssessment;
use crate::earthquake::EarthquakeEvent;
use crate::monitor::{
    assess_reported_earthquakes, AlertFeed, EarthquakeReported, LatestAssessment,
    MonitorSettings, MonitorStats, SimulationJob, TsunamiAlertRaised, TsunamiMonitorPlugin,
};

/// Alert events seen by the harness, in arrival order.
#[derive(Resource, Default)]
pub struct RecordedAlerts(pub Vec<TsunamiAlert>);

fn record_alerts(mut events: EventReader<TsunamiAlertRaised>, mut recorded: ResMut<RecordedAlerts>) {
    for TsunamiAlertRaised(alert) in events.read() {
        recorded.0.push(alert.clone());
    }
}

pub struct TestMonitor {
    app: App,
}

impl Default for TestMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMonitor {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Monitor with default settings and the Pacific catalog.
    pub fn new() -> Self {
        Self::build(None, None)
    }

    pub fn with_settings(settings: MonitorSettings) -> Self {
        Self::build(Some(settings), None)
    }

    /// Catalog inserted before the plugin, which must leave it in place.
    pub fn with_catalog(catalog: CoastalCityCatalog) -> Self {
        Self::build(None, Some(catalog))
    }

    fn build(settings: Option<MonitorSettings>, catalog: Option<CoastalCityCatalog>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        if let Some(catalog) = catalog {
            app.insert_resource(catalog);
        }
        app.add_plugins(TsunamiMonitorPlugin);
        if let Some(settings) = settings {
            app.insert_resource(settings);
        }
        app.init_resource::<RecordedAlerts>().add_systems(
            Update,
            record_alerts.after(assess_reported_earthquakes),
        );
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Queue a report; it is processed on the next `tick`.
    pub fn report(&mut self, event: EarthquakeEvent) -> &mut Self {
        self.app.world_mut().send_event(EarthquakeReported(event));
        self
    }

    /// Run `n` app updates, yielding between them so the
    /// `AsyncComputeTaskPool` threads make progress on small CI runners.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
            std::thread::yield_now();
        }
    }

    /// Update until no simulation is running, or `max_updates` is reached.
    /// Returns whether the monitor went idle.
    pub fn wait_for_simulation(&mut self, max_updates: u32) -> bool {
        for _ in 0..max_updates {
            self.app.update();
            if !self.resource::<SimulationJob>().is_running() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        false
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn latest(&self) -> Option<&TsunamiAssessment> {
        self.resource::<LatestAssessment>().assessment.as_ref()
    }

    pub fn simulation_pending(&self) -> bool {
        self.resource::<LatestAssessment>().simulation_pending
    }

    pub fn stats(&self) -> &MonitorStats {
        self.resource::<MonitorStats>()
    }

    pub fn feed(&self) -> &AlertFeed {
        self.resource::<AlertFeed>()
    }

    pub fn raised_alerts(&self) -> &[TsunamiAlert] {
        &self.resource::<RecordedAlerts>().0
    }
}
