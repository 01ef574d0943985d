//! Nearby store lookup.

use super::metrics;
use super::providers::{ProviderError, decode_error};
use crate::models::{NearbyQuery, Place, PlaceLocation};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;

pub const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api";

/// Upper bound on places returned for one search.
pub const MAX_RESULTS: usize = 10;

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, ProviderError>;

    fn name(&self) -> &str;

    fn is_mock(&self) -> bool {
        false
    }
}

pub struct GooglePlacesClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>, client: Client) -> Self {
        Self::with_base_url(api_key, PLACES_API_BASE, client)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, ProviderError> {
        let url = format!("{}/place/nearbysearch/json", self.base_url);
        let location = format!("{},{}", query.latitude, query.longitude);
        let radius = query.radius.to_string();

        tracing::debug!(
            location = %location,
            radius = query.radius,
            keyword = %query.keyword,
            "Searching nearby places"
        );

        let start = Instant::now();
        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("keyword", query.keyword.as_str()),
                    ("key", self.api_key.as_str()),
                ])
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(ProviderError::ApiError(format!(
                    "Places API HTTP {}",
                    response.status()
                )));
            }

            let body: NearbySearchResponse = response.json().await.map_err(decode_error)?;

            into_places(body)
        }
        .await;
        metrics::record_provider_latency("google_places", "nearbysearch", start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            metrics::record_provider_error("google_places", e.kind());
        }
        result
    }

    fn name(&self) -> &str {
        "google_places"
    }
}

fn into_places(body: NearbySearchResponse) -> Result<Vec<Place>, ProviderError> {
    match body.status.as_str() {
        "OK" => Ok(body
            .results
            .into_iter()
            .filter_map(RawPlace::into_place)
            .take(MAX_RESULTS)
            .collect()),
        "ZERO_RESULTS" => Ok(Vec::new()),
        "OVER_QUERY_LIMIT" => Err(ProviderError::RateLimited),
        status => Err(ProviderError::ApiError(match body.error_message {
            Some(message) => format!("Places API error: {} ({})", status, message),
            None => format!("Places API error: {}", status),
        })),
    }
}

/// Two fixed stores next to the query point.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPlaces;

impl MockPlaces {
    pub fn stores(latitude: f64, longitude: f64) -> Vec<Place> {
        vec![
            Place {
                place_id: "mock_001".to_string(),
                name: "Siêu thị BigC".to_string(),
                vicinity: "123 Nguyễn Văn Cừ, Quận 1".to_string(),
                rating: Some(4.2),
                types: vec![
                    "supermarket".to_string(),
                    "food".to_string(),
                    "establishment".to_string(),
                ],
                location: PlaceLocation {
                    lat: latitude + 0.001,
                    lng: longitude + 0.001,
                },
            },
            Place {
                place_id: "mock_002".to_string(),
                name: "Chợ Bến Thành".to_string(),
                vicinity: "Lê Lợi, Quận 1".to_string(),
                rating: Some(4.0),
                types: vec![
                    "food".to_string(),
                    "market".to_string(),
                    "establishment".to_string(),
                ],
                location: PlaceLocation {
                    lat: latitude + 0.002,
                    lng: longitude + 0.002,
                },
            },
        ]
    }
}

#[async_trait]
impl PlaceSearch for MockPlaces {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, ProviderError> {
        Ok(Self::stores(query.latitude, query.longitude))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn is_mock(&self) -> bool {
        true
    }
}

// Places API response types

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    vicinity: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: PlaceLocation,
}

impl RawPlace {
    fn into_place(self) -> Option<Place> {
        let location = self.geometry?.location;
        Some(Place {
            place_id: self.place_id,
            name: self.name,
            vicinity: self.vicinity,
            rating: self.rating,
            types: self.types,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> Result<Vec<Place>, ProviderError> {
        into_places(serde_json::from_value(body).unwrap())
    }

    fn raw_place(i: usize) -> serde_json::Value {
        json!({
            "place_id": format!("p{}", i),
            "name": format!("Chợ {}", i),
            "vicinity": "Quận 3",
            "types": ["market"],
            "geometry": {"location": {"lat": 10.78, "lng": 106.69}}
        })
    }

    #[test]
    fn ok_status_keeps_top_ten() {
        let results: Vec<_> = (0..15).map(raw_place).collect();
        let places = parse(json!({"status": "OK", "results": results})).unwrap();
        assert_eq!(places.len(), MAX_RESULTS);
        assert_eq!(places[0].place_id, "p0");
        assert_eq!(places[0].rating, None);
    }

    #[test]
    fn zero_results_is_empty_not_error() {
        assert!(parse(json!({"status": "ZERO_RESULTS"})).unwrap().is_empty());
    }

    #[test]
    fn other_statuses_are_errors() {
        let denied = parse(json!({"status": "REQUEST_DENIED", "error_message": "bad key"}));
        match denied {
            Err(ProviderError::ApiError(message)) => assert!(message.contains("bad key")),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            parse(json!({"status": "OVER_QUERY_LIMIT"})),
            Err(ProviderError::RateLimited)
        ));
    }

    #[test]
    fn places_without_geometry_are_skipped() {
        let places = parse(json!({
            "status": "OK",
            "results": [{"place_id": "x", "name": "No location"}, raw_place(1)]
        }))
        .unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_id, "p1");
    }

    #[tokio::test]
    async fn mock_returns_two_stores_near_query() {
        let query = NearbyQuery {
            latitude: 10.0,
            longitude: 106.0,
            radius: 2000,
            keyword: "supermarket".into(),
        };
        let places = MockPlaces.nearby(&query).await.unwrap();
        assert_eq!(places.len(), 2);
        assert!((places[1].location.lat - 10.002).abs() < 1e-9);
        assert!(MockPlaces.is_mock());
    }
}
