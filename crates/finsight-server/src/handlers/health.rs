//! Service health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;
use finsight_core::AIBackend;

/// GET /api/health - Service and AI backend status
///
/// Unauthenticated; reports whether an AI backend is configured and
/// reachable so deployments can check readiness.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let ai = match &state.ai {
        Some(client) => json!({
            "configured": true,
            "healthy": client.health_check().await,
            "model": client.model(),
        }),
        None => json!({
            "configured": false,
        }),
    };

    Json(json!({
        "status": "ok",
        "ai": ai,
    }))
}
