//! Great-circle math on a spherical Earth.
//!
//! Inputs are assumed valid; range checks happen where records enter the
//! engine (see `EarthquakeEvent::validate`).

use serde::{Deserialize, Serialize};

use crate::config::EARTH_RADIUS_KM;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Haversine distance between two points (km).
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h marginally past 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Initial bearing from `a` towards `b`, in [0, 360) degrees clockwise from north.
pub fn bearing_degrees(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Point reached by travelling `distance_km` from `origin` along `bearing_deg`.
/// Longitude is normalised to [-180, 180).
pub fn destination(origin: GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.latitude.to_radians();
    let lambda1 = origin.longitude.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    let longitude = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    GeoPoint::new(phi2.to_degrees(), longitude)
}

/// Geographic position of a planar (east, north) offset from `origin`, in km.
pub fn offset_to_geo(origin: GeoPoint, east_km: f64, north_km: f64) -> GeoPoint {
    let dist = (east_km * east_km + north_km * north_km).sqrt();
    if dist == 0.0 {
        return origin;
    }
    let bearing = east_km.atan2(north_km).to_degrees();
    destination(origin, bearing, dist)
}
