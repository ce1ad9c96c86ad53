// src/models/diagnosis.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Caller-supplied diagnosis payload. All fields are optional and the
/// record is stored exactly as received; keys we don't know about ride
/// along in `extra` so nothing the caller sent is lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<String>>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// One persisted run: the prompt plus whatever diagnosis the caller
/// attached. Insert-only; rows are never updated or deleted.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct DiagnosisRun {
    pub id: Uuid,
    pub scenario_id: Option<Uuid>,
    pub input: String,
    pub diagnosis: Json<Diagnosis>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_diagnosis_serializes_to_empty_object() {
        let value = serde_json::to_value(Diagnosis::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn known_fields_round_trip_verbatim() {
        let payload = json!({
            "summary": "Feature pipeline emitting nulls",
            "checks": ["Check null-rate by feature"],
            "causes": ["Upstream schema change"],
            "actions": ["Rollback the upstream change"]
        });
        let diagnosis: Diagnosis = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(serde_json::to_value(&diagnosis).unwrap(), payload);
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let payload = json!({
            "summary": "GPU OOM",
            "confidence": 0.8,
            "notes": ["bumped batch size"]
        });
        let diagnosis: Diagnosis = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(diagnosis.extra.len(), 2);
        assert_eq!(serde_json::to_value(&diagnosis).unwrap(), payload);
    }

    #[test]
    fn absent_fields_are_omitted_on_output() {
        let diagnosis: Diagnosis =
            serde_json::from_value(json!({ "summary": "drift" })).unwrap();
        let value = serde_json::to_value(&diagnosis).unwrap();
        assert_eq!(value, json!({ "summary": "drift" }));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(serde_json::from_value::<Diagnosis>(json!("not an object")).is_err());
        assert!(serde_json::from_value::<Diagnosis>(json!(["a", "b"])).is_err());
    }

    #[test]
    fn run_serializes_with_storage_field_names() {
        let run = DiagnosisRun {
            id: Uuid::new_v4(),
            scenario_id: None,
            input: "GPU OOM during training".to_string(),
            diagnosis: Json(Diagnosis::default()),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&run).unwrap();
        assert!(value.get("scenario_id").is_some());
        assert!(value.get("created_at").is_some());
        assert_eq!(value["input"], "GPU OOM during training");
        assert_eq!(value["diagnosis"], json!({}));
    }
}
