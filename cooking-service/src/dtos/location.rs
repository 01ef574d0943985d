use crate::cuisine::Region;
use crate::models::{NearbyQuery, Place};
use crate::models::language;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_radius() -> u32 {
    2000
}

fn default_place_query() -> String {
    "supermarket".to_string()
}

/// Coordinates are range-checked by the classifier, not here, so that an
/// out-of-range point is a 400 rather than a validation failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(
        default = "language::default_language",
        deserialize_with = "language::deserialize"
    )]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct RegionalSuggestionsResponse {
    pub region: Region,
    pub region_name: &'static str,
    pub suggestions: &'static [&'static str],
    pub latitude: f64,
    pub longitude: f64,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlacesRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_place_query")]
    #[validate(length(min = 1, max = 100))]
    pub query: String,
    #[serde(default = "default_radius")]
    #[validate(range(min = 100, max = 50000))]
    pub radius: u32,
}

impl PlacesRequest {
    pub fn to_query(&self) -> NearbyQuery {
        NearbyQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            radius: self.radius,
            keyword: self.query.trim().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub results: Vec<Place>,
    pub total: usize,
    pub search_radius: u32,
    pub source: String,
    pub mock_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_request_defaults() {
        let req: PlacesRequest =
            serde_json::from_str(r#"{"latitude": 10.7, "longitude": 106.6}"#).unwrap();
        assert_eq!(req.radius, 2000);
        assert_eq!(req.query, "supermarket");
        assert!(req.validate().is_ok());
        assert_eq!(req.to_query().keyword, "supermarket");
    }

    #[test]
    fn radius_is_bounded() {
        let req: PlacesRequest =
            serde_json::from_str(r#"{"latitude": 0, "longitude": 0, "radius": 60000}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
