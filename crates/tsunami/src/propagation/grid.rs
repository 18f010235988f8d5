use serde::{Deserialize, Serialize};

use crate::config::{SimulationConfig, MAX_GRID_CELLS};
use crate::error::EngineError;

/// Per-cell wave height in meters over a `(2n+1) x (2n+1)` lattice.
///
/// The center node sits exactly on the epicenter. Cell `(x, y)` lies
/// `(x - n) * resolution_km` east and `(y - n) * resolution_km` north of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationGrid {
    /// Signed height per cell (width * width); negative values are troughs.
    pub cells: Vec<f32>,
    pub width: usize,
    /// Cells from the center to the edge (`n`).
    pub half_cells: usize,
    pub resolution_km: f64,
}

impl SimulationGrid {
    /// A flat grid reaching `half_cells` nodes out from the center in each direction.
    pub fn new(half_cells: usize, resolution_km: f64) -> Self {
        let width = 2 * half_cells + 1;
        Self {
            cells: vec![0.0; width * width],
            width,
            half_cells,
            resolution_km,
        }
    }

    /// Grid covering the distance a wave at `travel_speed_kmh` covers by the
    /// horizon, clipped to `config.max_half_extent_km`.
    ///
    /// Always at least one cell out from the center. Fails with
    /// `GridTooLarge` instead of allocating beyond `MAX_GRID_CELLS`.
    pub fn for_config(config: &SimulationConfig, travel_speed_kmh: f64) -> Result<Self, EngineError> {
        config.validate()?;
        let reach_km = (travel_speed_kmh * config.horizon_minutes / 60.0).min(config.max_half_extent_km);
        let half_cells = (reach_km / config.grid_resolution_km).ceil().max(1.0);

        let width = 2.0 * half_cells + 1.0;
        let cells = width * width;
        if cells > MAX_GRID_CELLS as f64 {
            return Err(EngineError::GridTooLarge {
                cells: cells.min(usize::MAX as f64) as usize,
                limit: MAX_GRID_CELLS,
            });
        }
        Ok(Self::new(half_cells as usize, config.grid_resolution_km))
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: f32) {
        let idx = self.index(x, y);
        self.cells[idx] = val;
    }

    pub fn center(&self) -> (usize, usize) {
        (self.half_cells, self.half_cells)
    }

    /// Planar (east, north) offset of a cell from the epicenter (km).
    pub fn offset_km(&self, x: usize, y: usize) -> (f64, f64) {
        let n = self.half_cells as f64;
        (
            (x as f64 - n) * self.resolution_km,
            (y as f64 - n) * self.resolution_km,
        )
    }

    /// Planar distance of a cell from the epicenter (km).
    pub fn distance_km(&self, x: usize, y: usize) -> f64 {
        let (east, north) = self.offset_km(x, y);
        (east * east + north * north).sqrt()
    }

    /// Distance of every cell from the epicenter, in cell-index order.
    pub fn distance_field(&self) -> Vec<f64> {
        let mut field = Vec::with_capacity(self.cells.len());
        for y in 0..self.width {
            for x in 0..self.width {
                field.push(self.distance_km(x, y));
            }
        }
        field
    }

    /// Largest height in the grid, or 0 for an empty grid.
    pub fn max_height(&self) -> f32 {
        max_or_zero(&self.cells)
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|h| *h = 0.0);
    }
}

pub(crate) fn max_or_zero(heights: &[f32]) -> f32 {
    heights
        .iter()
        .copied()
        .reduce(f32::max)
        .unwrap_or(0.0)
}
