use crate::dtos::{ApiResponse, FileInfo, ImageAnalysisResponse, MAX_IMAGE_BYTES};
use crate::models::language;
use crate::services::generator::{FALLBACK_MODEL, MockProvider};
use crate::services::metrics;
use crate::services::providers::ImageInput;
use crate::startup::AppState;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use axum::body::Bytes;
use service_core::error::AppError;

/// Form overhead allowed on top of the image itself.
pub const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

struct Upload {
    filename: String,
    content_type: String,
    data: Bytes,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow::anyhow!(
            "Image must be at most {} MB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        ))
    } else {
        AppError::BadRequest(anyhow::anyhow!(
            "Failed to read multipart field: {}",
            err.body_text()
        ))
    }
}

/// Analyze an uploaded photo of food. Expects a `file` part holding an
/// image and an optional `language` part.
pub async fn analyze_food_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImageAnalysisResponse>>, AppError> {
    let mut upload = None;
    let mut language = language::default_language();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("unnamed").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                if !content_type.starts_with("image/") {
                    return Err(AppError::BadRequest(anyhow::anyhow!(
                        "File must be an image"
                    )));
                }
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some(Upload {
                    filename,
                    content_type,
                    data,
                });
            }
            "language" => {
                let raw = field.text().await.map_err(multipart_error)?;
                language = language::normalize_code(&raw);
            }
            _ => {}
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file uploaded")))?;
    if upload.data.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("Uploaded file is empty")));
    }
    if upload.data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::PayloadTooLarge(anyhow::anyhow!(
            "Image must be at most {} MB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }

    tracing::info!(
        provider = %state.generator.name(),
        content_type = %upload.content_type,
        size = upload.data.len(),
        "Analyzing food image"
    );

    let image = ImageInput {
        mime_type: &upload.content_type,
        data: &upload.data,
    };

    let (result, message) = match state.generator.analyze_image(image, &language).await {
        Ok(result) => (result, "Image analysis completed successfully"),
        Err(e) => {
            tracing::warn!(
                provider = %state.generator.name(),
                error = %e,
                "Image analysis failed, serving sample analysis"
            );
            metrics::record_fallback("analyze_image");
            let mut sample = MockProvider::image_analysis(&language);
            sample.model = FALLBACK_MODEL.to_string();
            (
                sample,
                "AI provider unavailable, returned a sample analysis",
            )
        }
    };

    let size = upload.data.len();
    Ok(Json(
        ApiResponse::ok(ImageAnalysisResponse {
            result,
            file_info: FileInfo {
                filename: upload.filename,
                content_type: upload.content_type,
                size,
            },
        })
        .with_message(message),
    ))
}
