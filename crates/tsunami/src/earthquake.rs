use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geo::GeoPoint;

/// Milliseconds per minute, for converting travel times onto event timestamps.
pub const MS_PER_MINUTE: f64 = 60_000.0;

/// One already-parsed seismic record, as handed over by the ingestion layer.
///
/// The engine never mutates an event; every component borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Moment magnitude.
    pub magnitude: f64,
    pub depth_km: f64,
    /// UTC instant in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub place: Option<String>,
}

impl EarthquakeEvent {
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        magnitude: f64,
        depth_km: f64,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            magnitude,
            depth_km,
            timestamp_ms,
            place: None,
        }
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn epicenter(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Display label, falling back to the event id when no place is known.
    pub fn place_label(&self) -> &str {
        self.place.as_deref().unwrap_or(&self.id)
    }

    /// Rejects out-of-range coordinates and negative or non-finite
    /// magnitude/depth. Nothing is clamped.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.epicenter().is_valid() {
            return Err(EngineError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if !self.magnitude.is_finite() || self.magnitude < 0.0 {
            return Err(EngineError::InvalidMagnitude(self.magnitude));
        }
        if !self.depth_km.is_finite() || self.depth_km < 0.0 {
            return Err(EngineError::InvalidDepth(self.depth_km));
        }
        Ok(())
    }

    /// Timestamp `minutes` after the event.
    pub fn offset_timestamp_ms(&self, minutes: f64) -> i64 {
        self.timestamp_ms + (minutes * MS_PER_MINUTE).round() as i64
    }
}
