use crate::cuisine::dishes::DishIngredients;
use crate::models::language;
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_servings() -> u32 {
    4
}

fn default_cuisine() -> String {
    "vietnamese".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NutritionRequest {
    #[validate(length(min = 1, message = "at least one ingredient is required"))]
    pub ingredients: Vec<String>,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 100))]
    pub servings: u32,
    #[serde(
        default = "language::default_language",
        deserialize_with = "language::deserialize"
    )]
    pub language: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientSuggestionRequest {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub dish_name: String,
    #[serde(default = "default_cuisine")]
    pub cuisine_type: String,
}

#[derive(Debug, Serialize)]
pub struct IngredientSuggestionResponse {
    pub dish_name: String,
    pub cuisine_type: String,
    #[serde(flatten)]
    pub ingredients: DishIngredients,
}
