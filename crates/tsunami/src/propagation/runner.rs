use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::earthquake::EarthquakeEvent;
use crate::error::EngineError;
use crate::summary::{summarize, SimulationSummary};
use crate::threat::{classify, ThreatLevel};

use super::cancel::CancellationToken;
use super::frame::SimulationFrame;
use super::grid::SimulationGrid;
use super::model::WaveSource;

/// Whether a run reached its horizon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    Complete,
    /// Stopped early by its cancellation token. Frames up to that point are valid.
    Cancelled,
}

/// Frames and statistics of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub event_id: String,
    pub threat: ThreatLevel,
    pub frames: Vec<SimulationFrame>,
    pub summary: SimulationSummary,
    pub status: RunStatus,
    pub initial_height_m: f64,
    pub travel_speed_kmh: f64,
}

impl SimulationOutcome {
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }
}

/// Simulates wave propagation for `event` up to `config.horizon_minutes`.
pub fn run_simulation(
    event: &EarthquakeEvent,
    config: &SimulationConfig,
) -> Result<SimulationOutcome, EngineError> {
    run_simulation_cancellable(event, config, &CancellationToken::new())
}

/// Like `run_simulation`, but checks `cancel` before every frame.
///
/// Invalid input fails before any work is done. Cancellation is not an
/// error: the outcome carries the frames computed so far and
/// `RunStatus::Cancelled`.
pub fn run_simulation_cancellable(
    event: &EarthquakeEvent,
    config: &SimulationConfig,
    cancel: &CancellationToken,
) -> Result<SimulationOutcome, EngineError> {
    run_simulation_observed(event, config, cancel, |_, _| {})
}

/// Cancellable run that hands each frame to `on_frame` as soon as it is
/// captured, for callers that stream frames to a renderer.
pub fn run_simulation_observed<F>(
    event: &EarthquakeEvent,
    config: &SimulationConfig,
    cancel: &CancellationToken,
    mut on_frame: F,
) -> Result<SimulationOutcome, EngineError>
where
    F: FnMut(usize, &SimulationFrame),
{
    #[cfg(feature = "trace")]
    let _span = bevy::log::info_span!("run_simulation").entered();

    event.validate()?;
    config.validate()?;

    let threat = classify(event);
    let source = WaveSource::for_event(event, threat, config.grid_resolution_km);
    let mut grid = SimulationGrid::for_config(config, source.travel_speed_kmh)?;
    let distances = grid.distance_field();
    let frame_count = config.frame_count();

    debug!(
        "Simulating {} ({}): {}x{} grid at {} km, {} frames, source height {:.2} m",
        event.id,
        threat,
        grid.width,
        grid.width,
        grid.resolution_km,
        frame_count,
        source.initial_height_m
    );

    let mut frames = Vec::with_capacity(frame_count);
    let mut status = RunStatus::Complete;

    for step in 0..frame_count {
        if cancel.is_cancelled() {
            status = RunStatus::Cancelled;
            info!(
                "Simulation of {} cancelled after {} of {} frames",
                event.id,
                frames.len(),
                frame_count
            );
            break;
        }

        let t = step as f64 * config.time_step_minutes;
        for (cell, &d) in grid.cells.iter_mut().zip(&distances) {
            *cell = source.height_at(d, t) as f32;
        }
        let frame = SimulationFrame::capture(t, &grid);
        on_frame(step, &frame);
        frames.push(frame);
    }

    let summary = summarize(&frames);
    debug!(
        "Simulation of {} finished: max {:.2} m, {} affected cells",
        event.id, summary.max_wave_height_m, summary.affected_cell_count
    );

    Ok(SimulationOutcome {
        event_id: event.id.clone(),
        threat,
        frames,
        summary,
        status,
        initial_height_m: source.initial_height_m,
        travel_speed_kmh: source.travel_speed_kmh,
    })
}
