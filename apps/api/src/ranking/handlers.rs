//! Axum route handlers for the ranking API.

use std::path::PathBuf;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ResumeSource;
use crate::errors::{AppError, ExtractionError};
use crate::models::ranking::RankingPool;
use crate::ranking::report::{load_json, persist, ranking_json_path, PersistedRanking};
use crate::routes::blocking;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub jd_text: String,
    pub candidates: Vec<ResumeSource>,
    #[serde(default)]
    pub persist: bool,
}

#[derive(Debug, Deserialize)]
pub struct RankFolderRequest {
    pub folder: PathBuf,
    pub jd_text: String,
    #[serde(default)]
    pub persist: bool,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    #[serde(flatten)]
    pub pool: RankingPool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<PersistedRanking>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rankings
///
/// Ranks the given candidates against one job description.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    if request.candidates.is_empty() {
        return Err(AppError::Validation("candidates cannot be empty".to_string()));
    }

    let engine = state.engine.clone();
    let results_dir = state.config.results_dir.clone();
    let response = blocking("ranking", move || -> Result<RankResponse, AppError> {
        let pool = engine.rank_candidates(&request.candidates, &request.jd_text)?;
        finish(pool, request.persist.then_some(results_dir))
    })
    .await??;

    Ok(Json(response))
}

/// POST /api/v1/rankings/folder
///
/// Ranks every `.pdf`, `.docx` and `.txt` résumé in a server-side folder.
pub async fn handle_rank_folder(
    State(state): State<AppState>,
    Json(request): Json<RankFolderRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let engine = state.engine.clone();
    let results_dir = state.config.results_dir.clone();
    let response = blocking("folder ranking", move || -> Result<RankResponse, AppError> {
        let pool = engine
            .rank_folder(&request.folder, &request.jd_text)
            .map_err(|e| match e {
                ExtractionError::NotFound(folder) => {
                    AppError::NotFound(format!("Folder {folder} not found"))
                }
                other => other.into(),
            })?;
        finish(pool, request.persist.then_some(results_dir))
    })
    .await??;

    Ok(Json(response))
}

/// GET /api/v1/rankings/:run_id
///
/// Reloads a ranking previously saved with `persist: true`.
pub async fn handle_get_ranking(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Json<RankingPool>, AppError> {
    let path = ranking_json_path(&state.config.results_dir, run_id);
    if !path.is_file() {
        return Err(AppError::NotFound(format!("Ranking {run_id} not found")));
    }

    let pool = blocking("ranking load", move || load_json(&path)).await??;
    Ok(Json(pool))
}

fn finish(pool: RankingPool, results_dir: Option<PathBuf>) -> Result<RankResponse, AppError> {
    let saved = results_dir.map(|dir| persist(&pool, &dir)).transpose()?;
    Ok(RankResponse { pool, saved })
}
