//! Thumbnail reverse proxy
//!
//! Serves `GET /canto-thumbnail/{scheme}/{id}` by fetching the
//! authenticated binary preview from Canto and streaming it back with
//! the upstream content type. Keeps the tenant token on the server:
//! browsers only ever see this local URL.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::models::Scheme;
use crate::web::AppState;

/// Browsers are told to cache thumbnails as long as the resolver caches
/// the records that reference them
const CACHE_CONTROL: &str = "public, max-age=3600";
const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

pub async fn serve_thumbnail(
    State(state): State<AppState>,
    Path((scheme, asset_id)): Path<(String, String)>,
) -> Response {
    let Some(scheme) = Scheme::parse(&scheme) else {
        return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
    };
    if asset_id.is_empty() {
        return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
    }

    match state.api.fetch_preview(scheme, &asset_id).await {
        Ok(preview) => {
            let content_type = preview
                .content_type
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
                ],
                preview.bytes,
            )
                .into_response()
        }
        Err(err) => {
            debug!("thumbnail fetch failed for {}/{}: {}", scheme, asset_id, err);
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}
