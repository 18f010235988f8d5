//! Aggregate statistics over a simulation's frame sequence.

use serde::{Deserialize, Serialize};

use crate::config::AFFECTED_HEIGHT_M;
use crate::propagation::SimulationFrame;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Highest cell height over every frame (m).
    pub max_wave_height_m: f32,
    /// Distinct cells whose height exceeded `AFFECTED_HEIGHT_M` in any frame.
    pub affected_cell_count: usize,
    /// Time offset of the last frame (minutes).
    pub duration_minutes: f64,
    /// First frame holding `max_wave_height_m`.
    pub peak_frame_index: usize,
    pub frame_count: usize,
}

/// Summary using the default affected-cell threshold.
/// An empty frame sequence gives an all-zero summary.
pub fn summarize(frames: &[SimulationFrame]) -> SimulationSummary {
    summarize_with_threshold(frames, AFFECTED_HEIGHT_M)
}

pub fn summarize_with_threshold(frames: &[SimulationFrame], affected_threshold_m: f32) -> SimulationSummary {
    let Some(last) = frames.last() else {
        return SimulationSummary::default();
    };

    let mut max_wave_height_m = frames[0].max_height_m;
    let mut peak_frame_index = 0;
    for (i, frame) in frames.iter().enumerate().skip(1) {
        // Strictly greater keeps the first frame on ties.
        if frame.max_height_m > max_wave_height_m {
            max_wave_height_m = frame.max_height_m;
            peak_frame_index = i;
        }
    }

    let cell_count = frames.iter().map(|f| f.heights.len()).max().unwrap_or(0);
    let mut affected = vec![false; cell_count];
    for frame in frames {
        for (flag, &h) in affected.iter_mut().zip(&frame.heights) {
            if h > affected_threshold_m {
                *flag = true;
            }
        }
    }

    SimulationSummary {
        max_wave_height_m,
        affected_cell_count: affected.iter().filter(|&&a| a).count(),
        duration_minutes: last.time_offset_minutes,
        peak_frame_index,
        frame_count: frames.len(),
    }
}
