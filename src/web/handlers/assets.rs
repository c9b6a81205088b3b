//! Single-asset HTTP handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::{debug, info};

use crate::web::{
    AppState,
    responses::{handle_result, ok},
};

/// Fetch one asset by its Canto id
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    summary = "Get asset",
    params(
        ("id" = String, Path, description = "Canto asset id"),
    ),
    responses(
        (status = 200, description = "The asset"),
        (status = 404, description = "No asset with this id"),
        (status = 502, description = "Upstream API failure")
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    debug!("asset lookup: {}", id);
    handle_result(state.resolver.resolve_by_id(&id).await)
}

/// Flush every cached asset record
///
/// Called by the host's deactivation and uninstall hooks; always
/// succeeds, even when the cache is already empty.
#[utoipa::path(
    delete,
    path = "/cache",
    tag = "cache",
    summary = "Flush the resolution cache",
    responses(
        (status = 200, description = "Number of entries removed"),
    )
)]
pub async fn clear_cache(State(state): State<AppState>) -> impl IntoResponse {
    let removed = state.resolver.clear_cache().await;
    info!("resolution cache flushed ({} entries)", removed);
    ok(serde_json::json!({ "removed": removed }))
}
