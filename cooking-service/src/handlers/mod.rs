pub mod health;
pub mod learning;
pub mod location;
pub mod nutrition;
pub mod recipes;
pub mod vision;

pub use health::{health_check, metrics, readiness_check, service_info};
pub use learning::learning_path_plan;
pub use location::{nearby_places, regional_suggestions};
pub use nutrition::{ingredient_suggestions, nutrition_analysis};
pub use recipes::{chat, generate_recipe};
pub use vision::analyze_food_image;

use axum::http::Uri;
use service_core::error::AppError;

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
