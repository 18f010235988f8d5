//! Tests for `TsunamiMonitorPlugin`: alerting, background simulation, and
//! supersession of in-flight runs by newer reports.

use crate::alerts::{AlertThresholds, TsunamiAlert};
use crate::arrivals::{CoastalCity, CoastalCityCatalog};
use crate::assessment::AssessmentPolicy;
use crate::config::{ArrivalSettings, SimulationConfig};
use crate::earthquake::EarthquakeEvent;
use crate::monitor::{AlertFeed, MonitorSettings, MAX_FEED_ALERTS};
use crate::propagation::RunStatus;
use crate::test_harness::TestMonitor;
use crate::threat::ThreatLevel;

const MAX_WAIT_UPDATES: u32 = 5_000;

fn quick_settings() -> MonitorSettings {
    MonitorSettings {
        policy: AssessmentPolicy {
            simulation: SimulationConfig::new(100.0, 15.0, 60.0),
            ..AssessmentPolicy::default()
        },
        thresholds: AlertThresholds::default(),
    }
}

fn tohoku(id: &str) -> EarthquakeEvent {
    EarthquakeEvent::new(id, 38.3, 142.4, 8.5, 30.0, 1_700_000_000_000).with_place("off Honshu")
}

fn chile(id: &str) -> EarthquakeEvent {
    EarthquakeEvent::new(id, -36.1, -72.9, 8.2, 25.0, 1_700_000_060_000)
}

// ====================================================================
// Alerting
// ====================================================================

#[test]
fn test_major_report_raises_alert_with_arrivals() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    monitor.report(tohoku("tohoku"));
    monitor.tick(1);

    let alerts = monitor.raised_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, "tsunami_tohoku");
    assert_eq!(alerts[0].threat, ThreatLevel::Extreme);
    assert_eq!(alerts[0].place, "off Honshu");
    assert_eq!(alerts[0].arrivals.len(), 8);
    assert_eq!(alerts[0].arrivals[0].city, "Tokyo, Japan");
    assert_eq!(monitor.feed().alerts.len(), 1);
    assert_eq!(monitor.feed().active_count(), 1);
}

#[test]
fn test_deep_report_is_assessed_without_alert() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    // High by the table, but deeper than the alert limit.
    monitor.report(EarthquakeEvent::new("deep", 10.0, 125.0, 7.7, 140.0, 0));
    monitor.tick(1);

    assert!(monitor.raised_alerts().is_empty());
    let latest = monitor.latest().expect("assessment");
    assert_eq!(latest.threat, ThreatLevel::High);
    assert!(monitor.wait_for_simulation(MAX_WAIT_UPDATES));
}

#[test]
fn test_minor_report_is_not_escalated() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    monitor.report(EarthquakeEvent::new("minor", 35.0, 140.0, 5.1, 10.0, 0));
    monitor.tick(1);

    let latest = monitor.latest().expect("assessment");
    assert_eq!(latest.threat, ThreatLevel::Minimal);
    assert!(latest.arrivals.is_empty());
    assert!(latest.simulation.is_none());
    assert!(!monitor.simulation_pending());
    assert!(monitor.raised_alerts().is_empty());
    assert_eq!(monitor.stats().events_assessed, 1);
    assert_eq!(monitor.stats().simulations_started, 0);
}

#[test]
fn test_invalid_report_is_rejected() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    monitor.report(EarthquakeEvent::new("bad", 95.0, 0.0, 8.0, 10.0, 0));
    monitor.tick(1);

    assert!(monitor.latest().is_none());
    assert!(monitor.raised_alerts().is_empty());
    assert_eq!(monitor.stats().events_rejected, 1);
    assert_eq!(monitor.stats().events_assessed, 0);
}

// ====================================================================
// Background simulation
// ====================================================================

#[test]
fn test_simulation_result_attaches_to_latest_assessment() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    monitor.report(tohoku("tohoku"));
    monitor.tick(1);

    let pending = monitor.latest().expect("assessment");
    assert_eq!(pending.arrivals.len(), 8);

    assert!(monitor.wait_for_simulation(MAX_WAIT_UPDATES));
    assert!(!monitor.simulation_pending());

    let latest = monitor.latest().expect("assessment");
    let sim = latest.simulation.as_ref().expect("simulation attached");
    assert_eq!(sim.event_id, "tohoku");
    assert_eq!(sim.status, RunStatus::Complete);
    assert_eq!(sim.frames.len(), 5);
    assert!(sim.summary.max_wave_height_m > 0.0);
    assert_eq!(monitor.stats().simulations_started, 1);
    assert_eq!(monitor.stats().simulations_completed, 1);
}

#[test]
fn test_newer_report_supersedes_running_simulation() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    monitor.report(tohoku("first")).report(chile("second"));
    monitor.tick(1);

    assert_eq!(monitor.stats().simulations_started, 2);
    assert_eq!(monitor.stats().simulations_superseded, 1);
    assert_eq!(monitor.latest().map(|a| a.event.id.as_str()), Some("second"));

    assert!(monitor.wait_for_simulation(MAX_WAIT_UPDATES));
    let latest = monitor.latest().expect("assessment");
    assert_eq!(latest.event.id, "second");
    let sim = latest.simulation.as_ref().expect("simulation attached");
    assert_eq!(sim.event_id, "second");
    assert!(sim.is_complete());
    // The superseded run is dropped, never collected.
    assert_eq!(monitor.stats().simulations_completed, 1);
    assert_eq!(monitor.raised_alerts().len(), 2);
}

#[test]
fn test_minor_report_cancels_stale_simulation() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    monitor
        .report(tohoku("major"))
        .report(EarthquakeEvent::new("aftershock", 38.0, 142.0, 5.5, 20.0, 0));
    monitor.tick(1);

    assert_eq!(monitor.stats().simulations_superseded, 1);
    assert!(!monitor.simulation_pending());
    assert!(monitor.wait_for_simulation(1));
    let latest = monitor.latest().expect("assessment");
    assert_eq!(latest.event.id, "aftershock");
    assert!(latest.simulation.is_none());
}

#[test]
fn test_sequential_reports_each_complete() {
    let mut monitor = TestMonitor::with_settings(quick_settings());
    monitor.report(tohoku("first"));
    monitor.tick(1);
    assert!(monitor.wait_for_simulation(MAX_WAIT_UPDATES));

    monitor.report(chile("second"));
    monitor.tick(1);
    assert!(monitor.wait_for_simulation(MAX_WAIT_UPDATES));

    let stats = monitor.stats();
    assert_eq!(stats.simulations_started, 2);
    assert_eq!(stats.simulations_completed, 2);
    assert_eq!(stats.simulations_superseded, 0);
    let sim = monitor
        .latest()
        .and_then(|a| a.simulation.as_ref())
        .expect("simulation");
    assert_eq!(sim.event_id, "second");
}

// ====================================================================
// Resources
// ====================================================================

#[test]
fn test_plugin_keeps_caller_catalog() {
    let catalog = CoastalCityCatalog::new(vec![CoastalCity::new("Hilo, HI", 19.7, -155.1)]);
    let mut monitor = TestMonitor::with_catalog(catalog.clone());
    assert_eq!(monitor.resource::<CoastalCityCatalog>(), &catalog);

    monitor.report(tohoku("tohoku"));
    monitor.tick(1);
    let alerts = monitor.raised_alerts();
    assert_eq!(alerts[0].arrivals.len(), 1);
    assert_eq!(alerts[0].arrivals[0].city, "Hilo, HI");
}

#[test]
fn test_alert_and_assessment_share_arrival_settings() {
    let mut settings = quick_settings();
    settings.policy.arrivals.max_relevant_radius_km = 1000.0;
    let mut monitor = TestMonitor::with_settings(settings);
    monitor.report(tohoku("tohoku"));
    monitor.tick(1);

    let alert_cities: Vec<String> = monitor.raised_alerts()[0]
        .arrivals
        .iter()
        .map(|a| a.city.clone())
        .collect();
    assert_eq!(alert_cities, ["Tokyo, Japan"]);

    let latest = monitor.latest().expect("assessment");
    assert_eq!(latest.arrivals, monitor.raised_alerts()[0].arrivals);
    assert!(monitor.wait_for_simulation(MAX_WAIT_UPDATES));
}

#[test]
fn test_invalid_arrival_settings_reject_reports() {
    let mut settings = quick_settings();
    settings.policy.arrivals.travel_speed_kmh = 0.0;
    let mut monitor = TestMonitor::with_settings(settings);
    monitor.report(tohoku("a")).report(chile("b"));
    monitor.tick(1);

    assert!(monitor.latest().is_none());
    assert!(monitor.raised_alerts().is_empty());
    assert_eq!(monitor.stats().events_rejected, 2);
    assert_eq!(monitor.stats().simulations_started, 0);
}

#[test]
fn test_default_plugin_uses_pacific_catalog() {
    let monitor = TestMonitor::new();
    assert_eq!(monitor.resource::<CoastalCityCatalog>().len(), 8);
    assert_eq!(monitor.resource::<MonitorSettings>(), &MonitorSettings::default());
}

#[test]
fn test_alert_feed_drops_oldest() {
    let mut feed = AlertFeed::default();
    let catalog = CoastalCityCatalog::default();
    for i in 0..(MAX_FEED_ALERTS + 10) {
        let event = EarthquakeEvent::new(format!("q{i}"), 0.0, 0.0, 7.1, 10.0, 0);
        feed.push(
            TsunamiAlert::from_event(&event, &catalog, &ArrivalSettings::default()).expect("alert"),
        );
    }
    assert_eq!(feed.alerts.len(), MAX_FEED_ALERTS);
    assert_eq!(feed.alerts[0].earthquake_id, "q10");
    // Medium alerts are not counted as active.
    assert_eq!(feed.active_count(), 0);
}
