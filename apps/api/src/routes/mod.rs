pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::{extraction, matching, ranking, requirements};

/// Runs CPU-bound pipeline work off the async executor.
pub(crate) async fn blocking<T, F>(task: &'static str, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {task}: {e}")))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/parse",
            post(extraction::handlers::handle_parse_resume),
        )
        .route(
            "/api/v1/jobs/parse",
            post(requirements::handlers::handle_parse_job),
        )
        .route("/api/v1/match", post(matching::handlers::handle_match))
        .route("/api/v1/rankings", post(ranking::handlers::handle_rank))
        .route(
            "/api/v1/rankings/folder",
            post(ranking::handlers::handle_rank_folder),
        )
        .route(
            "/api/v1/rankings/:run_id",
            get(ranking::handlers::handle_get_ranking),
        )
        .with_state(state)
}
