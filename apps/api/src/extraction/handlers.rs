//! Axum route handlers for the résumé parsing API.

use axum::{extract::State, Json};

use crate::engine::ResumeSource;
use crate::errors::AppError;
use crate::models::resume::ExtractedResume;
use crate::routes::blocking;
use crate::state::AppState;

/// POST /api/v1/resumes/parse
///
/// Accepts `{text, file_name?}` or `{path}`. A document that cannot be read
/// still returns 200 with the `error` field set on the résumé.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(source): Json<ResumeSource>,
) -> Result<Json<ExtractedResume>, AppError> {
    if let ResumeSource::Path { path } = &source {
        if path.as_os_str().is_empty() {
            return Err(AppError::Validation("path cannot be empty".to_string()));
        }
    }

    let engine = state.engine.clone();
    let resume = blocking("resume parsing", move || engine.parse_resume(&source)).await?;

    Ok(Json(resume))
}
