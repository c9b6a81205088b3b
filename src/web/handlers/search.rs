//! Asset search HTTP handlers

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::web::{
    AppState,
    responses::{handle_result, ok},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Keyword; empty or absent lists the newest assets
    #[serde(default)]
    pub query: Option<String>,
    /// Asset id the form currently holds; prepended to the results when
    /// the search page does not contain it
    #[serde(default)]
    pub selected_id: Option<String>,
}

/// Search the Canto library
#[utoipa::path(
    post,
    path = "/search",
    tag = "assets",
    summary = "Search assets",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching assets, newest first"),
        (status = 502, description = "Upstream API failure"),
        (status = 503, description = "Canto not configured")
    )
)]
pub async fn search_assets(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    let keyword = request.query.unwrap_or_default();
    debug!("search request: '{}'", keyword);

    let result = state
        .resolver
        .search(&keyword, request.selected_id.as_deref())
        .await;
    handle_result(result)
}

#[derive(Debug, Deserialize)]
pub struct FindByFilenameParams {
    pub filename: String,
}

/// Resolve a stored filename back to its asset
#[utoipa::path(
    get,
    path = "/assets/by-filename",
    tag = "assets",
    summary = "Find asset by filename",
    params(
        ("filename" = String, Query, description = "Stored field value to resolve"),
    ),
    responses(
        (status = 200, description = "The matching asset"),
        (status = 400, description = "Missing filename"),
        (status = 404, description = "No asset matched")
    )
)]
pub async fn find_by_filename(
    State(state): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<FindByFilenameParams>,
) -> impl IntoResponse {
    if params.filename.is_empty() {
        return crate::web::responses::bad_request("Filename required").into_response();
    }

    handle_result(state.resolver.resolve_by_filename(&params.filename).await)
}

#[derive(Debug, Deserialize)]
pub struct FormatValueParams {
    pub filename: String,
    #[serde(default)]
    pub return_format: crate::models::ReturnFormat,
}

/// Render a stored field value in the configured return format
///
/// Success with a null payload means the value no longer resolves; the
/// form host renders its empty state for that.
#[utoipa::path(
    get,
    path = "/format-value",
    tag = "assets",
    summary = "Format a stored field value",
    params(
        ("filename" = String, Query, description = "Stored field value"),
        ("return_format" = Option<String>, Query, description = "object, id or url"),
    ),
    responses(
        (status = 200, description = "Formatted value, or null when unresolvable"),
    )
)]
pub async fn format_value(
    State(state): State<AppState>,
    axum::extract::Query(params): axum::extract::Query<FormatValueParams>,
) -> impl IntoResponse {
    match state
        .resolver
        .format_value(&params.filename, params.return_format)
        .await
    {
        Ok(value) => ok(value).into_response(),
        Err(err) => crate::web::responses::handle_error(err.into()),
    }
}
