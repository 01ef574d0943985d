//! Latitude-band classification of Vietnamese culinary regions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Latitude above which a location counts as northern (roughly Thanh Hoa).
pub const NORTH_LATITUDE_THRESHOLD: f64 = 20.0;

/// Latitude above which a location counts as central (roughly Da Nang).
pub const CENTRAL_LATITUDE_THRESHOLD: f64 = 16.0;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidCoordinate {
    #[error("Invalid latitude: {0}")]
    Latitude(f64),

    #[error("Invalid longitude: {0}")]
    Longitude(f64),
}

/// One of the three fixed Vietnamese regions used for dish suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "mien_bac")]
    North,
    #[serde(rename = "mien_trung")]
    Central,
    #[serde(rename = "mien_nam")]
    South,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::North, Region::Central, Region::South];

    /// Wire code, e.g. `mien_bac`.
    pub fn code(self) -> &'static str {
        match self {
            Region::North => "mien_bac",
            Region::Central => "mien_trung",
            Region::South => "mien_nam",
        }
    }

    /// Human readable name. Vietnamese for `vi`, English otherwise.
    pub fn display_name(self, language: &str) -> &'static str {
        match (self, language) {
            (Region::North, "vi") => "Miền Bắc",
            (Region::Central, "vi") => "Miền Trung",
            (Region::South, "vi") => "Miền Nam",
            (Region::North, _) => "Northern Vietnam",
            (Region::Central, _) => "Central Vietnam",
            (Region::South, _) => "Southern Vietnam",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Reject non-finite values and anything outside [-90, 90] x [-180, 180].
pub fn check_coordinate(latitude: f64, longitude: f64) -> Result<(), InvalidCoordinate> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(InvalidCoordinate::Latitude(latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(InvalidCoordinate::Longitude(longitude));
    }
    Ok(())
}

/// Map a coordinate to its region.
///
/// Only latitude takes part in the decision. Longitude is range-checked but
/// otherwise ignored, which keeps results identical to the existing clients.
pub fn classify(latitude: f64, longitude: f64) -> Result<Region, InvalidCoordinate> {
    check_coordinate(latitude, longitude)?;

    let region = if latitude > NORTH_LATITUDE_THRESHOLD {
        Region::North
    } else if latitude > CENTRAL_LATITUDE_THRESHOLD {
        Region::Central
    } else {
        Region::South
    };

    Ok(region)
}
