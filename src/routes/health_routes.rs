use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

/// Lightweight read against the backing store. Doubles as a keep-alive for
/// the hosted database.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = Utc::now();

    let probe: Result<Option<Uuid>, sqlx::Error> =
        sqlx::query_scalar("SELECT id FROM healer_applications LIMIT 1")
            .fetch_optional(&state.db)
            .await;

    match probe {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                timestamp,
                message: Some("database reachable"),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!("health check failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    timestamp,
                    message: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
