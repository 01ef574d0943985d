use crate::models::AnalyzedImage;
use serde::Serialize;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct ImageAnalysisResponse {
    #[serde(flatten)]
    pub result: AnalyzedImage,
    pub file_info: FileInfo,
}
