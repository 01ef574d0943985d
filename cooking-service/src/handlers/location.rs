use crate::cuisine::{check_coordinate, classify, suggestions};
use crate::dtos::{
    ApiResponse, LocationRequest, PlacesRequest, PlacesResponse, RegionalSuggestionsResponse,
};
use crate::services::metrics;
use crate::services::places::MockPlaces;
use crate::startup::AppState;
use axum::{Json, extract::State};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn regional_suggestions(
    ValidatedJson(request): ValidatedJson<LocationRequest>,
) -> Result<Json<ApiResponse<RegionalSuggestionsResponse>>, AppError> {
    let region = classify(request.latitude, request.longitude)
        .map_err(|e| AppError::BadRequest(e.into()))?;

    tracing::debug!(region = %region, language = %request.language, "Resolved region");

    Ok(Json(ApiResponse::ok(RegionalSuggestionsResponse {
        region,
        region_name: region.display_name(&request.language),
        suggestions: suggestions(region, &request.language),
        latitude: request.latitude,
        longitude: request.longitude,
        language: request.language,
    })))
}

pub async fn nearby_places(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PlacesRequest>,
) -> Result<Json<ApiResponse<PlacesResponse>>, AppError> {
    check_coordinate(request.latitude, request.longitude)
        .map_err(|e| AppError::BadRequest(e.into()))?;

    let query = request.to_query();
    let (results, source, mock_data, message) = match state.places.nearby(&query).await {
        Ok(results) => (
            results,
            state.places.name().to_string(),
            state.places.is_mock(),
            None,
        ),
        Err(e) => {
            tracing::warn!(
                provider = %state.places.name(),
                error = %e,
                "Place search failed, serving sample stores"
            );
            metrics::record_fallback("nearby_places");
            (
                MockPlaces::stores(query.latitude, query.longitude),
                "mock".to_string(),
                true,
                Some("Place search unavailable, returned sample stores"),
            )
        }
    };

    let mut response = ApiResponse::ok(PlacesResponse {
        total: results.len(),
        results,
        search_radius: query.radius,
        source,
        mock_data,
    });
    if let Some(message) = message {
        response = response.with_message(message);
    }

    Ok(Json(response))
}
