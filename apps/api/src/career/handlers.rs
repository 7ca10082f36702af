use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::career::cover_letter::{generate_cover_letter, CoverLetter, CoverLetterRequest};
use crate::career::interview::{interview_questions, InterviewRequest, InterviewSet};
use crate::career::prefill::{prefill_from_text, upload_text, Prefill};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetter>, AppError> {
    let letter = generate_cover_letter(state.generator.as_ref(), &req).await?;
    info!(
        "Generated cover letter for {} at {} ({} words)",
        req.position, req.company, letter.word_count
    );
    Ok(Json(letter))
}

/// POST /api/cover-letter/prefill
///
/// Reads the first file part of the upload.
pub async fn handle_prefill(mut multipart: Multipart) -> Result<Json<Prefill>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;

        let text = upload_text(file_name.as_deref(), content_type.as_deref(), bytes).await?;
        return Ok(Json(prefill_from_text(&text)));
    }
    Err(AppError::Validation("No resume file uploaded".to_string()))
}

/// POST /api/mock-interview
pub async fn handle_mock_interview(
    State(state): State<AppState>,
    Json(req): Json<InterviewRequest>,
) -> Json<InterviewSet> {
    Json(interview_questions(state.generator.as_ref(), &req).await)
}
