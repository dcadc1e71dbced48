use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service banner, mirrored by the mobile client's startup check.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Service IA Muscul IA / Muscul IA AI Service",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// GET /health
/// Liveness probe. Does not touch the model backend; use
/// /test-ai-connection for that.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "ai-muscul-ia"
    }))
}
