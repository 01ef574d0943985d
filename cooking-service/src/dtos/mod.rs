pub mod learning;
pub mod location;
pub mod nutrition;
pub mod vision;

pub use learning::{CustomizedFor, LearningPathRequest, LearningPathResponse};
pub use location::{LocationRequest, PlacesRequest, PlacesResponse, RegionalSuggestionsResponse};
pub use nutrition::{IngredientSuggestionRequest, IngredientSuggestionResponse, NutritionRequest};
pub use vision::{FileInfo, ImageAnalysisResponse, MAX_IMAGE_BYTES};

use chrono::Utc;
use serde::Serialize;

/// Envelope wrapped around every successful JSON response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let value = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], serde_json::json!([1, 2]));
        assert!(value.get("message").is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());

        let value = serde_json::to_value(ApiResponse::ok(()).with_message("degraded")).unwrap();
        assert_eq!(value["message"], "degraded");
    }
}
