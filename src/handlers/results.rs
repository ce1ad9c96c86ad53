// src/handlers/results.rs
use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::diagnosis::DiagnosisRun;
use crate::AppState;

/// Fixed history page size; there is no cursor.
const RECENT_RUNS_LIMIT: i64 = 50;

pub fn results_routes() -> Router {
    Router::new().route("/api/results", get(list_recent_runs))
}

/// GET /api/results - the most recent runs, newest first
async fn list_recent_runs(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let results = sqlx::query_as::<_, DiagnosisRun>(
        "SELECT id, scenario_id, input, diagnosis, created_at
         FROM diagnosis_runs
         ORDER BY created_at DESC
         LIMIT $1",
    )
    .bind(RECENT_RUNS_LIMIT)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(json!({ "results": results })))
}
