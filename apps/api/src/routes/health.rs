use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Returns a simple status object with service version. Touches no state,
/// so it stays up even when the model API is down.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "service": "parley-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
