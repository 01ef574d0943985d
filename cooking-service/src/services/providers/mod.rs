//! Generative text provider abstractions and implementations.
//!
//! A provider turns a prompt into text. Everything cooking-specific lives
//! above this layer in [`crate::services::generator`].

pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;

/// Error type for provider and other upstream collaborator calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Empty response from provider")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    /// The request URL is dropped: it may carry an API key in its query.
    fn from(err: reqwest::Error) -> Self {
        ProviderError::NetworkError(err.without_url().to_string())
    }
}

/// Parse failure of an upstream response body, without the request URL.
pub(crate) fn decode_error(err: reqwest::Error) -> ProviderError {
    ProviderError::ApiError(format!("Failed to parse response: {}", err.without_url()))
}

/// Image sent along with a prompt.
#[derive(Debug, Clone, Copy)]
pub struct ImageInput<'a> {
    pub mime_type: &'a str,
    pub data: &'a [u8],
}

impl ImageInput<'_> {
    pub fn base64(&self) -> String {
        general_purpose::STANDARD.encode(self.data)
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: FinishReason,
}

/// Sampling parameters for a generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    pub top_p: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<u32>,
}

impl GenerationParams {
    pub fn recipe() -> Self {
        Self {
            temperature: Some(0.7),
            top_p: None,
            max_tokens: Some(2048),
        }
    }

    pub fn chat() -> Self {
        Self {
            temperature: Some(0.7),
            top_p: None,
            max_tokens: Some(1000),
        }
    }

    pub fn vision() -> Self {
        Self {
            temperature: Some(0.4),
            top_p: None,
            max_tokens: Some(1024),
        }
    }
}

/// Trait for text generation backends (Gemini, OpenAI).
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Generate text about an image, e.g. a photo of a dish.
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: ImageInput<'_>,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Model identifier reported to clients.
    fn model(&self) -> &str;
}

/// Map an unsuccessful upstream status to a provider error.
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode, body: &str) -> ProviderError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        ProviderError::RateLimited
    } else {
        ProviderError::ApiError(format!("{} API error {}: {}", provider, status, body))
    }
}
