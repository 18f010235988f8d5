use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool};

use crate::alerts::TsunamiAlert;
use crate::arrivals::{estimate_arrivals_with, CoastalCityCatalog};
use crate::assessment::TsunamiAssessment;
use crate::propagation::run_simulation_cancellable;
use crate::propagation::CancellationToken;
use crate::threat::classify;

use super::types::{
    AlertFeed, EarthquakeReported, LatestAssessment, MonitorSettings, MonitorStats,
    RunningSimulation, SimulationFinished, SimulationJob, TsunamiAlertRaised,
};

/// Assess every reported earthquake and start a background simulation for
/// escalated ones.
///
/// Each valid report replaces `LatestAssessment`. If a simulation is still
/// running for an older report it is cancelled and dropped, since its result
/// could no longer attach to the latest assessment.
#[allow(clippy::too_many_arguments)]
pub fn assess_reported_earthquakes(
    mut reports: EventReader<EarthquakeReported>,
    settings: Res<MonitorSettings>,
    catalog: Res<CoastalCityCatalog>,
    mut latest: ResMut<LatestAssessment>,
    mut job: ResMut<SimulationJob>,
    mut feed: ResMut<AlertFeed>,
    mut stats: ResMut<MonitorStats>,
    mut alerts: EventWriter<TsunamiAlertRaised>,
) {
    let policy = settings.policy;
    if let Err(err) = policy.arrivals.validate() {
        warn!("Dropping {} earthquake reports: {}", reports.len(), err);
        stats.events_rejected += reports.len() as u32;
        reports.clear();
        return;
    }

    for EarthquakeReported(event) in reports.read() {
        if let Err(err) = event.validate() {
            warn!("Rejected earthquake report {}: {}", event.id, err);
            stats.events_rejected += 1;
            continue;
        }
        stats.events_assessed += 1;

        let threat = classify(event);
        if settings.thresholds.is_tsunami_risk(event) {
            match TsunamiAlert::from_event(event, &catalog, &policy.arrivals) {
                Ok(alert) => {
                    info!(
                        "Tsunami alert {} raised: M{:.1} {} ({})",
                        alert.id, alert.magnitude, alert.place, alert.threat
                    );
                    feed.push(alert.clone());
                    alerts.send(TsunamiAlertRaised(alert));
                }
                Err(err) => warn!("No alert for {}: {}", event.id, err),
            }
        }

        if let Some(previous) = job.running.take() {
            previous.token.cancel();
            stats.simulations_superseded += 1;
            debug!(
                "Simulation of {} superseded by {}",
                previous.event_id, event.id
            );
        }

        let escalated = threat >= policy.min_level;
        let arrivals = if escalated {
            estimate_arrivals_with(event, catalog.cities(), &policy.arrivals).unwrap_or_default()
        } else {
            Vec::new()
        };

        latest.assessment = Some(TsunamiAssessment {
            event: event.clone(),
            threat,
            arrivals,
            simulation: None,
        });
        latest.simulation_pending = escalated;

        if !escalated {
            debug!("{} classified {}: not escalated", event.id, threat);
            continue;
        }

        let token = CancellationToken::new();
        let task_token = token.clone();
        let task_event = event.clone();
        let config = policy.simulation;
        let task = AsyncComputeTaskPool::get()
            .spawn(async move { run_simulation_cancellable(&task_event, &config, &task_token) });

        job.running = Some(RunningSimulation {
            event_id: event.id.clone(),
            token,
            task,
        });
        stats.simulations_started += 1;
        info!("{} classified {}: simulation started", event.id, threat);
    }
}

/// Poll the running simulation and attach its outcome to `LatestAssessment`.
pub fn collect_simulation_results(
    mut job: ResMut<SimulationJob>,
    mut latest: ResMut<LatestAssessment>,
    mut stats: ResMut<MonitorStats>,
    mut finished: EventWriter<SimulationFinished>,
) {
    let Some(running) = job.running.as_mut() else {
        return;
    };
    let Some(result) = block_on(futures_lite::future::poll_once(&mut running.task)) else {
        return;
    };
    let event_id = std::mem::take(&mut running.event_id);
    job.running = None;
    latest.simulation_pending = false;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("Simulation of {} failed: {}", event_id, err);
            return;
        }
    };

    stats.simulations_completed += 1;
    finished.send(SimulationFinished {
        event_id: event_id.clone(),
        status: outcome.status,
        summary: outcome.summary,
    });

    match latest.assessment.as_mut() {
        Some(assessment) if assessment.event.id == event_id => {
            info!(
                "Simulation of {} finished: max wave {:.2} m over {} frames",
                event_id, outcome.summary.max_wave_height_m, outcome.summary.frame_count
            );
            assessment.simulation = Some(outcome);
        }
        _ => debug!("Discarding simulation of {}: no longer latest", event_id),
    }
}

pub struct TsunamiMonitorPlugin;

impl Plugin for TsunamiMonitorPlugin {
    fn build(&self, app: &mut App) {
        // Keep a catalog inserted before the plugin.
        if !app.world().contains_resource::<CoastalCityCatalog>() {
            app.insert_resource(CoastalCityCatalog::pacific_default());
        }
        app.init_resource::<MonitorSettings>()
            .init_resource::<LatestAssessment>()
            .init_resource::<AlertFeed>()
            .init_resource::<MonitorStats>()
            .init_resource::<SimulationJob>()
            .add_event::<EarthquakeReported>()
            .add_event::<TsunamiAlertRaised>()
            .add_event::<SimulationFinished>()
            .add_systems(
                Update,
                (assess_reported_earthquakes, collect_simulation_results).chain(),
            );
    }
}
