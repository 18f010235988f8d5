// ---------------------------------------------------------------------------
// EngineError: typed rejection of malformed input at the call boundary
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors returned by the engine's entry points.
///
/// Every variant is an input-validation failure. Empty inputs and cancelled
/// runs are not errors; they produce empty or partial results instead.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or non-finite.
    InvalidCoordinates { latitude: f64, longitude: f64 },
    /// Magnitude is negative or non-finite.
    InvalidMagnitude(f64),
    /// Depth is negative or non-finite.
    InvalidDepth(f64),
    /// A simulation setting is zero, negative, or non-finite.
    InvalidConfig { field: &'static str, value: f64 },
    /// The requested grid would exceed the allocation limit.
    GridTooLarge { cells: usize, limit: usize },
    /// The horizon holds more time steps than the frame limit.
    TooManyFrames { frames: usize, limit: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(
                f,
                "Invalid coordinates: ({latitude}, {longitude}) is outside [-90, 90] x [-180, 180]"
            ),
            EngineError::InvalidMagnitude(m) => {
                write!(f, "Invalid magnitude: {m} (must be finite and >= 0)")
            }
            EngineError::InvalidDepth(d) => {
                write!(f, "Invalid depth: {d} km (must be finite and >= 0)")
            }
            EngineError::InvalidConfig { field, value } => {
                write!(f, "Invalid simulation config: {field} = {value} (must be > 0)")
            }
            EngineError::GridTooLarge { cells, limit } => write!(
                f,
                "Simulation grid too large: {cells} cells requested, limit is {limit}"
            ),
            EngineError::TooManyFrames { frames, limit } => write!(
                f,
                "Simulation too long: {frames} frames requested, limit is {limit}"
            ),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_coordinates() {
        let err = EngineError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 10.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("Invalid coordinates"), "got: {msg}");
        assert!(msg.contains("91"), "got: {msg}");
    }

    #[test]
    fn test_display_invalid_config_names_field() {
        let err = EngineError::InvalidConfig {
            field: "time_step_minutes",
            value: 0.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("time_step_minutes"), "got: {msg}");
    }

    #[test]
    fn test_display_grid_too_large() {
        let err = EngineError::GridTooLarge {
            cells: 10_000_000,
            limit: 4_000_000,
        };
        let msg = format!("{err}");
        assert!(msg.contains("10000000"), "got: {msg}");
        assert!(msg.contains("4000000"), "got: {msg}");
    }

    #[test]
    fn test_display_too_many_frames() {
        let err = EngineError::TooManyFrames {
            frames: 5_000,
            limit: 2_000,
        };
        let msg = format!("{err}");
        assert!(msg.contains("5000"), "got: {msg}");
        assert!(msg.contains("2000"), "got: {msg}");
    }

    #[test]
    fn test_engine_error_is_error_trait() {
        let err = EngineError::InvalidDepth(-3.0);
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
