//! Wave-height propagation over a planar grid centered on the epicenter.
//!
//! Each run:
//!   1. Validates the event and the caller's `SimulationConfig`
//!   2. Classifies the event and derives the source height from magnitude and threat level
//!   3. Sizes a square grid to cover the front's reach at the horizon
//!   4. Steps from `t = 0` to the horizon, recomputing every cell and capturing a frame
//!   5. Polls the cancellation token between frames
//!   6. Summarises whatever frames were produced
//!
//! Runs share nothing: every call owns its grid and frames, so independent
//! earthquakes can be simulated on separate threads without locking.

pub mod cancel;
pub mod frame;
pub mod grid;
pub mod model;
pub mod runner;


pub use cancel::CancellationToken;
pub use frame::{SimulationFrame, WaveCell};
pub use grid::SimulationGrid;
pub use model::WaveSource;
pub use runner::{
    run_simulation, run_simulation_cancellable, run_simulation_observed, RunStatus,
    SimulationOutcome,
};
