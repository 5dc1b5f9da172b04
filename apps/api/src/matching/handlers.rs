//! Axum route handlers for the match API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::engine::ResumeSource;
use crate::errors::AppError;
use crate::models::matching::MatchResult;
use crate::routes::blocking;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(flatten)]
    pub resume: ResumeSource,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/v1/match
///
/// Parses the résumé (`text` or `path`) and scores it against `jd_text`.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let engine = state.engine.clone();
    let outcome = blocking("matching", move || {
        let resume = engine.parse_resume(&request.resume);
        engine.match_resume_to_jd(&resume, &request.jd_text)
    })
    .await?;

    Ok(match outcome {
        Ok(match_result) => (
            StatusCode::OK,
            Json(MatchResponse {
                success: true,
                match_result: Some(match_result),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(MatchResponse {
                success: false,
                match_result: None,
                error: Some(e.to_string()),
            }),
        ),
    })
}
