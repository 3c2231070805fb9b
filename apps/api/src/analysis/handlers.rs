use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::extraction::{MediaType, RawDocument};
use crate::analysis::taxonomy::TaxonomyEntry;
use crate::analysis::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart part carrying the résumé file.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_path: String,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_resume_part(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let stored = state
        .uploads
        .save(upload.file_name.as_deref(), &upload.bytes)
        .await?;

    let media_type = MediaType::detect(
        upload.content_type.as_deref(),
        upload.file_name.as_deref(),
        &upload.bytes,
    );
    info!(
        file = %stored.file_name,
        media_type = media_type.as_str(),
        bytes = upload.bytes.len(),
        "Resume uploaded"
    );

    let document = RawDocument::new(upload.bytes, media_type);
    let report = state.analyzer.analyze(&document).await;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_path: stored.public_path,
        report,
    }))
}

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<Vec<TaxonomyEntry>> {
    Json(state.analyzer.taxonomy().entries())
}

/// Returns the first `resume` part. A part with no file name and no content
/// is what browsers send for an empty file input, so it counts as missing.
async fn read_resume_part(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        if bytes.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
            return Ok(None);
        }

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}
