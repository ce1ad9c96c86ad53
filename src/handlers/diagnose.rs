// src/handlers/diagnose.rs
use axum::{extract::Extension, response::Json, routing::post, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::diagnosis::Diagnosis;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseRequest {
    #[serde(default)]
    pub scenario_id: Option<String>,
    // Kept as a raw value so a missing or mistyped prompt is our
    // validation error, not a deserialization rejection.
    #[serde(default)]
    pub prompt: Value,
    #[serde(default)]
    pub diagnosis: Diagnosis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseResponse {
    pub ok: bool,
    pub scenario_id: Option<String>,
    pub input: String,
    pub diagnosis: Diagnosis,
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
}

pub fn diagnose_routes() -> Router {
    Router::new().route("/api/diagnose", post(submit_diagnosis))
}

/// POST /api/diagnose - persist one run and echo it back with the
/// db-assigned id and timestamp
async fn submit_diagnosis(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<DiagnoseRequest>,
) -> Result<Json<DiagnoseResponse>, ApiError> {
    // Validation happens before any storage access.
    let prompt = match request.prompt.as_str() {
        Some(p) if !p.is_empty() => p.to_owned(),
        _ => return Err(ApiError::Validation("prompt is required".to_string())),
    };

    // The scenario id goes through as text and is cast in the
    // statement; a bad reference surfaces as a storage error.
    let (run_id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
        "INSERT INTO diagnosis_runs (scenario_id, input, diagnosis)
         VALUES ($1::uuid, $2, $3)
         RETURNING id, created_at",
    )
    .bind(request.scenario_id.as_deref())
    .bind(&prompt)
    .bind(sqlx::types::Json(&request.diagnosis))
    .fetch_one(&state.db_pool)
    .await?;

    tracing::info!("Recorded diagnosis run {} ({} chars of input)", run_id, prompt.len());

    Ok(Json(DiagnoseResponse {
        ok: true,
        scenario_id: request.scenario_id,
        input: prompt,
        diagnosis: request.diagnosis,
        run_id,
        created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::unreachable_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn post_diagnose(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/diagnose")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // The pool in these tests only connects when a query runs, so a 400
    // also proves the handler never reached storage.

    #[tokio::test]
    async fn empty_prompt_is_rejected_before_storage() {
        let app = diagnose_routes().layer(Extension(unreachable_state()));

        let response = app.oneshot(post_diagnose(r#"{"prompt":""}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "prompt is required" }));
    }

    #[tokio::test]
    async fn missing_prompt_is_rejected_before_storage() {
        let app = diagnose_routes().layer(Extension(unreachable_state()));

        let response = app.oneshot(post_diagnose(r#"{}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "prompt is required" }));
    }

    #[tokio::test]
    async fn non_string_prompt_is_rejected_before_storage() {
        let app = diagnose_routes().layer(Extension(unreachable_state()));

        let response = app.oneshot(post_diagnose(r#"{"prompt":42}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "prompt is required" }));
    }

    #[tokio::test]
    async fn storage_outage_maps_to_internal_error() {
        let app = diagnose_routes().layer(Extension(unreachable_state()));

        let response = app
            .oneshot(post_diagnose(r#"{"prompt":"GPU OOM during training"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal error");
        assert!(!body["details"].as_str().unwrap().is_empty());
    }
}
