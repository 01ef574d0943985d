//! Application startup and lifecycle management.

use crate::config::{CookingConfig, ProviderChoice};
use crate::dtos::MAX_IMAGE_BYTES;
use crate::handlers;
use crate::handlers::vision::FORM_OVERHEAD_BYTES;
use crate::services::metrics::metrics_middleware;
use crate::services::providers::TextProvider;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::openai::{OpenAiConfig, OpenAiTextProvider};
use crate::services::{
    ExternalProvider, GooglePlacesClient, MockPlaces, MockProvider, PlaceSearch, RecipeGenerator,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::from_fn,
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::{
    REQUEST_ID_HEADER, request_id_middleware, security_headers_middleware,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Upstream HTTP timeout shared by every provider client.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CookingConfig>,
    pub generator: Arc<dyn RecipeGenerator>,
    pub places: Arc<dyn PlaceSearch>,
}

impl AppState {
    /// Wire up providers from configuration. The choice is made once here.
    pub fn from_config(config: CookingConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        let generator: Arc<dyn RecipeGenerator> = match config.ai.resolve()? {
            ProviderChoice::Gemini { api_key, model } => {
                let provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(
                    GeminiConfig::new(api_key, model),
                    client.clone(),
                ));
                Arc::new(ExternalProvider::new("gemini", provider))
            }
            ProviderChoice::OpenAi { api_key, model } => {
                let provider: Arc<dyn TextProvider> = Arc::new(OpenAiTextProvider::new(
                    OpenAiConfig::new(api_key, model),
                    client.clone(),
                ));
                Arc::new(ExternalProvider::new("openai", provider))
            }
            ProviderChoice::Mock => Arc::new(MockProvider),
        };

        let places: Arc<dyn PlaceSearch> = match &config.google_maps_api_key {
            Some(key) => Arc::new(GooglePlacesClient::new(key.clone(), client)),
            None => Arc::new(MockPlaces),
        };

        tracing::info!(
            generator = %generator.name(),
            places = %places.name(),
            "Initialized providers"
        );

        Ok(Self {
            config: Arc::new(config),
            generator,
            places,
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, request_id.clone()])
        .expose_headers([request_id])
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/api/ai/generate-recipe", post(handlers::generate_recipe))
        .route("/api/ai/chat", post(handlers::chat))
        .route(
            "/api/ai/vision",
            post(handlers::analyze_food_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + FORM_OVERHEAD_BYTES)),
        )
        .route("/api/ai/learning-path", post(handlers::learning_path_plan))
        .route(
            "/api/location/suggestions",
            post(handlers::regional_suggestions),
        )
        .route(
            "/api/ai/regional-suggestions",
            post(handlers::regional_suggestions),
        )
        .route("/api/places/nearby", post(handlers::nearby_places))
        .route(
            "/api/ai/nutrition-analysis",
            post(handlers::nutrition_analysis),
        )
        .route(
            "/api/ai/ingredient-suggestions",
            post(handlers::ingredient_suggestions),
        )
        .fallback(handlers::not_found)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: CookingConfig) -> Result<Self, AppError> {
        let addr = config.common.socket_addr();
        let state = AppState::from_config(config)?;

        // port 0 picks a random port, used by tests
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, "Cooking service listening");

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM, then drain in-flight requests.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
