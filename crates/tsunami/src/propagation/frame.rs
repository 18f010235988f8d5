use serde::{Deserialize, Serialize};

use crate::geo::{self, GeoPoint};

use super::grid::{max_or_zero, SimulationGrid};

/// Snapshot of the whole grid at one time offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationFrame {
    pub time_offset_minutes: f64,
    pub width: usize,
    pub resolution_km: f64,
    /// Row-major heights, same layout as `SimulationGrid::cells`.
    pub heights: Vec<f32>,
    /// Largest height in this frame (m).
    pub max_height_m: f32,
}

/// One displayable cell of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveCell {
    pub x: usize,
    pub y: usize,
    pub east_km: f64,
    pub north_km: f64,
    pub height_m: f32,
}

impl WaveCell {
    /// Geographic position of the cell relative to the epicenter.
    pub fn location(&self, epicenter: GeoPoint) -> GeoPoint {
        geo::offset_to_geo(epicenter, self.east_km, self.north_km)
    }
}

impl SimulationFrame {
    pub fn capture(time_offset_minutes: f64, grid: &SimulationGrid) -> Self {
        Self {
            time_offset_minutes,
            width: grid.width,
            resolution_km: grid.resolution_km,
            heights: grid.cells.clone(),
            max_height_m: grid.max_height(),
        }
    }

    /// Frame built from raw heights; `max_height_m` is derived from them.
    pub fn from_heights(
        time_offset_minutes: f64,
        width: usize,
        resolution_km: f64,
        heights: Vec<f32>,
    ) -> Self {
        let max_height_m = max_or_zero(&heights);
        Self {
            time_offset_minutes,
            width,
            resolution_km,
            heights,
            max_height_m,
        }
    }

    #[inline]
    pub fn height(&self, x: usize, y: usize) -> f32 {
        self.heights[y * self.width + x]
    }

    /// Cells whose absolute height exceeds `threshold_m`, in row-major order.
    /// Troughs are included so the renderer can draw both signs.
    pub fn significant_cells(&self, threshold_m: f32) -> Vec<WaveCell> {
        let n = (self.width / 2) as f64;
        self.heights
            .iter()
            .enumerate()
            .filter(|(_, h)| h.abs() > threshold_m)
            .map(|(idx, &height_m)| {
                let x = idx % self.width;
                let y = idx / self.width;
                WaveCell {
                    x,
                    y,
                    east_km: (x as f64 - n) * self.resolution_km,
                    north_km: (y as f64 - n) * self.resolution_km,
                    height_m,
                }
            })
            .collect()
    }

    pub fn is_flat(&self) -> bool {
        self.heights.iter().all(|&h| h == 0.0)
    }
}
