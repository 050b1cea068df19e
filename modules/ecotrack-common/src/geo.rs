use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A latitude/longitude pair in degrees. Not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn distance_miles_to(&self, other: &Coordinate) -> f64 {
        haversine_distance_miles(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Great-circle distance between two lat/lng points in miles.
///
/// Rounding can push the intermediate term a hair outside [0, 1] for
/// antipodal or polar inputs, so it is clamped before the square roots.
pub fn haversine_distance_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = ((dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}
