//! Health check HTTP handlers

use axum::{extract::State, response::IntoResponse};

use crate::web::{AppState, responses::ok};

/// Health check endpoint
///
/// Reports configuration state and cache occupancy. Does not probe the
/// upstream API; an unconfigured tenant is "degraded", not dead.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let configured = state.api.is_configured();
    let status = if configured { "healthy" } else { "degraded" };

    ok(serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
        "canto": {
            "configured": configured,
            "errors": state.api.config_errors(),
        },
        "cache": {
            "entries": state.resolver.cached_entries().await,
        },
        "uptime_seconds": (chrono::Utc::now() - state.start_time).num_seconds(),
    }))
}

/// Liveness check
pub async fn liveness_check() -> impl IntoResponse {
    ok(serde_json::json!({
        "status": "alive",
        "timestamp": chrono::Utc::now()
    }))
}
