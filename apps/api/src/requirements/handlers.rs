//! Axum route handlers for the job-description API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobRequirements;
use crate::routes::blocking;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseJobRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJobResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JobRequirements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/v1/jobs/parse
///
/// `{success: true, data}` on success, `{success: false, error}` with 422
/// when the description has no usable text.
pub async fn handle_parse_job(
    State(state): State<AppState>,
    Json(request): Json<ParseJobRequest>,
) -> Result<(StatusCode, Json<ParseJobResponse>), AppError> {
    let engine = state.engine.clone();
    let parsed = blocking("job parsing", move || {
        engine.parse_job_description(&request.jd_text)
    })
    .await?;

    Ok(match parsed {
        Ok(data) => (
            StatusCode::OK,
            Json(ParseJobResponse {
                success: true,
                data: Some(data),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ParseJobResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }),
        ),
    })
}
