#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cooking_service::config::CookingConfig;
use cooking_service::models::{
    AnalyzedImage, ChatReply, ChatRequest, GeneratedRecipe, NearbyQuery, Place, RecipeRequest,
};
use cooking_service::services::providers::{ImageInput, ProviderError};
use cooking_service::services::{MockPlaces, MockProvider, PlaceSearch, RecipeGenerator};
use cooking_service::startup::{AppState, build_router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

/// Generator whose upstream is always down.
pub struct FailingGenerator;

#[async_trait]
impl RecipeGenerator for FailingGenerator {
    async fn generate_recipe(
        &self,
        _request: &RecipeRequest,
    ) -> Result<GeneratedRecipe, ProviderError> {
        Err(ProviderError::NetworkError("connection refused".into()))
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatReply, ProviderError> {
        Err(ProviderError::RateLimited)
    }

    async fn analyze_image(
        &self,
        _image: ImageInput<'_>,
        _language: &str,
    ) -> Result<AnalyzedImage, ProviderError> {
        Err(ProviderError::ContentFiltered)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Err(ProviderError::NotConfigured("offline".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub struct FailingPlaces;

#[async_trait]
impl PlaceSearch for FailingPlaces {
    async fn nearby(&self, _query: &NearbyQuery) -> Result<Vec<Place>, ProviderError> {
        Err(ProviderError::ApiError("REQUEST_DENIED".into()))
    }

    fn name(&self) -> &str {
        "google_places"
    }
}

pub fn test_config(vars: &[(&str, &str)]) -> CookingConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let common = service_core::config::Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
    };
    CookingConfig::from_lookup(common, |key| vars.get(key).cloned()).unwrap()
}

pub fn mock_app() -> Router {
    build_router(AppState {
        config: Arc::new(test_config(&[])),
        generator: Arc::new(MockProvider),
        places: Arc::new(MockPlaces),
    })
}

pub fn failing_app() -> Router {
    build_router(AppState {
        config: Arc::new(test_config(&[])),
        generator: Arc::new(FailingGenerator),
        places: Arc::new(FailingPlaces),
    })
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub const BOUNDARY: &str = "cooking-test-boundary";

/// One part of a hand-built `multipart/form-data` body.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match part.filename {
            Some(filename) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, filename
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[FormPart<'_>]) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(parts)))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// A running server bound to a random local port.
pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app = cooking_service::startup::Application::build(test_config(&[]))
            .await
            .expect("Failed to build application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.expect("Server failed");
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
        }
    }
}
