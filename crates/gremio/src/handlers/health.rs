use axum::{response::IntoResponse, Json};

/// Liveness probe (GET /health).
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
