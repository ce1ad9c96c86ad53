// src/models/scenario.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Scenario {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
}

/// Listing shape for the `/demo` variant, where the scenario
/// description is served as a ready-to-run prompt.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct DemoScenario {
    pub id: Uuid,
    pub title: String,
    pub prompt: String,
}
