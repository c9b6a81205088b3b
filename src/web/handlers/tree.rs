//! Browse navigation HTTP handlers (folder tree and album listings)

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::web::{AppState, responses::handle_result};

/// Top layer of the folder/album tree
#[utoipa::path(
    get,
    path = "/tree",
    tag = "browse",
    summary = "List the tree root",
    responses(
        (status = 200, description = "Root folders and albums"),
        (status = 503, description = "Canto not configured")
    )
)]
pub async fn get_tree_root(State(state): State<AppState>) -> impl IntoResponse {
    handle_result(state.api.get_tree(None).await)
}

/// Children of one folder or album
#[utoipa::path(
    get,
    path = "/tree/{id}",
    tag = "browse",
    summary = "List a subtree",
    params(
        ("id" = String, Path, description = "Folder or album id"),
    ),
    responses(
        (status = 200, description = "Child folders and albums"),
    )
)]
pub async fn get_tree(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    debug!("tree lookup: {}", id);
    handle_result(state.api.get_tree(Some(&id)).await)
}

/// Assets contained in an album or folder
///
/// The id `all` is the synthetic fallback root and lists the newest
/// assets instead. An empty list is a normal answer for folders that
/// contain only subfolders.
#[utoipa::path(
    get,
    path = "/albums/{id}/assets",
    tag = "browse",
    summary = "List album assets",
    params(
        ("id" = String, Path, description = "Album or folder id"),
    ),
    responses(
        (status = 200, description = "Assets in the album, possibly empty"),
    )
)]
pub async fn get_album_assets(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    debug!("album listing: {}", id);

    if id == "all" {
        return handle_result(state.resolver.search("", None).await);
    }

    handle_result(state.resolver.album_assets(&id).await)
}
