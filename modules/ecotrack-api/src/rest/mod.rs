pub mod articles;
pub mod products;
pub mod recycling;

use crate::error::ApiError;

// --- Helpers ---

/// A finite degree value, or `None` if missing or unparseable.
pub fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Unparseable limits are ignored rather than rejected.
pub fn parse_limit(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok()
}

pub fn parse_id(raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid ID format"))
}
