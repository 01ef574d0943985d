use crate::cuisine::dishes::ingredients_for;
use crate::cuisine::nutrition::{NutritionAnalysis, analyze};
use crate::dtos::{
    ApiResponse, IngredientSuggestionRequest, IngredientSuggestionResponse, NutritionRequest,
};
use axum::Json;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn nutrition_analysis(
    ValidatedJson(request): ValidatedJson<NutritionRequest>,
) -> Result<Json<ApiResponse<NutritionAnalysis>>, AppError> {
    let analysis = analyze(&request.ingredients, request.servings, &request.language)
        .map_err(|e| AppError::BadRequest(e.into()))?;

    tracing::debug!(
        score = analysis.health_assessment.score,
        ingredients = request.ingredients.len(),
        "Nutrition analysed"
    );

    Ok(Json(ApiResponse::ok(analysis)))
}

pub async fn ingredient_suggestions(
    ValidatedJson(request): ValidatedJson<IngredientSuggestionRequest>,
) -> Result<Json<ApiResponse<IngredientSuggestionResponse>>, AppError> {
    let ingredients = ingredients_for(&request.dish_name);

    Ok(Json(ApiResponse::ok(IngredientSuggestionResponse {
        dish_name: request.dish_name,
        cuisine_type: request.cuisine_type,
        ingredients,
    })))
}
