//! Embedded static asset serving (placeholder thumbnails)

use axum::{
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::assets::StaticAssets;

/// Serve a bundled file from `assets/images/`
pub async fn serve_image(Path(file): Path<String>) -> Response {
    let path = format!("assets/images/{file}");

    match StaticAssets::get_asset(&path) {
        Some(asset) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    StaticAssets::get_content_type(&path).to_string(),
                ),
                (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
            ],
            asset.data.to_vec(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
