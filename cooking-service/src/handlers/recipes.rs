use crate::dtos::ApiResponse;
use crate::models::{ChatReply, ChatRequest, GeneratedRecipe, RecipeRequest};
use crate::services::generator::{MockProvider, fallback_chat_reply};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{Json, extract::State};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn generate_recipe(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecipeRequest>,
) -> Result<Json<ApiResponse<GeneratedRecipe>>, AppError> {
    if request.clean_ingredients().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Ingredients must not be blank"
        )));
    }

    tracing::info!(
        provider = %state.generator.name(),
        language = %request.language,
        ingredients = request.ingredients.len(),
        "Generating recipe"
    );

    let response = match state.generator.generate_recipe(&request).await {
        Ok(recipe) => ApiResponse::ok(recipe),
        Err(e) => {
            tracing::warn!(
                provider = %state.generator.name(),
                error = %e,
                "Recipe generation failed, serving sample recipe"
            );
            metrics::record_fallback("generate_recipe");
            ApiResponse::ok(MockProvider::recipe(&request))
                .with_message("AI provider unavailable, returned a sample recipe")
        }
    };

    Ok(Json(response))
}

pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Message must not be blank"
        )));
    }

    let response = match state.generator.chat(&request).await {
        Ok(reply) => ApiResponse::ok(reply),
        Err(e) => {
            tracing::warn!(
                provider = %state.generator.name(),
                error = %e,
                "Chat failed, serving canned reply"
            );
            metrics::record_fallback("chat");
            ApiResponse::ok(fallback_chat_reply(&request))
                .with_message("AI provider unavailable, returned a canned reply")
        }
    };

    Ok(Json(response))
}
