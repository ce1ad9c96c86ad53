// src/handlers/scenarios.rs
use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::scenario::{DemoScenario, Scenario};
use crate::AppState;

pub fn scenario_routes() -> Router {
    Router::new()
        .route("/api/scenarios", get(list_scenarios))
        .route("/demo", get(list_demo_scenarios))
}

/// GET /api/scenarios - the full catalog, newest first
async fn list_scenarios(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<Scenario>>, ApiError> {
    let scenarios = sqlx::query_as::<_, Scenario>(
        "SELECT id, slug, title, description FROM scenarios ORDER BY created_at DESC",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(scenarios))
}

/// GET /demo - listing variant where the description is served as the prompt
async fn list_demo_scenarios(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let scenarios = sqlx::query_as::<_, DemoScenario>(
        "SELECT id, title, description AS prompt FROM scenarios ORDER BY created_at DESC",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(json!({ "scenarios": scenarios })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::unreachable_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn catalog_outage_maps_to_internal_error() {
        let app = scenario_routes().layer(Extension(unreachable_state()));

        let response = app
            .oneshot(Request::builder().uri("/api/scenarios").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal error");
        assert!(!body["details"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_outage_maps_to_internal_error() {
        let app = scenario_routes().layer(Extension(unreachable_state()));

        let response = app
            .oneshot(Request::builder().uri("/demo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
