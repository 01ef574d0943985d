use crate::cuisine::learning::{SkillLevel, learning_path};
use crate::dtos::{ApiResponse, CustomizedFor, LearningPathRequest, LearningPathResponse};
use axum::Json;
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn learning_path_plan(
    ValidatedJson(request): ValidatedJson<LearningPathRequest>,
) -> Result<Json<ApiResponse<LearningPathResponse>>, AppError> {
    let skill_level = SkillLevel::from_name(&request.skill_level);
    let path = learning_path(skill_level, request.available_time);

    tracing::debug!(
        skill_level = ?skill_level,
        weeks = path.duration_weeks,
        "Learning path planned"
    );

    Ok(Json(ApiResponse::ok(LearningPathResponse {
        path,
        customized_for: CustomizedFor {
            skill_level,
            cuisine_preference: request.cuisine_preference,
            available_time: request.available_time,
        },
    })))
}
