use crate::dtos::ApiResponse;
use crate::startup::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};

const SERVICE_NAME: &str = "cooking-service";

pub async fn service_info(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "features": {
            "ai_provider": state.generator.name(),
            "places_provider": state.places.name(),
            "gemini_configured": state.config.ai.gemini_api_key.is_some(),
            "openai_configured": state.config.ai.openai_api_key.is_some(),
            "google_maps_configured": state.config.google_maps_api_key.is_some(),
        }
    })))
}

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: the configured generator must answer its health check.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.generator.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "provider": state.generator.name()
            })),
        ),
        Err(e) => {
            tracing::warn!(provider = %state.generator.name(), error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "provider": state.generator.name(),
                    "error": e.kind()
                })),
            )
        }
    }
}

pub async fn metrics() -> impl IntoResponse {
    crate::services::metrics::get_metrics()
}
