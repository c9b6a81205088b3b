//! Web layer module
//!
//! HTTP interface for the canto-bridge application: thin handlers that
//! delegate to the resolver and the Canto client, standardized response
//! envelopes, and the thumbnail reverse proxy.

use anyhow::Result;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::canto::CantoApi;
use crate::config::Config;
use crate::services::AssetResolver;

pub mod handlers;
pub mod openapi;
pub mod responses;

pub use responses::{ApiResponse, handle_error, handle_result, ok};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn CantoApi>,
    pub resolver: Arc<AssetResolver>,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(
        config: Config,
        api: Arc<dyn CantoApi>,
        resolver: Arc<AssetResolver>,
    ) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        let state = AppState {
            config,
            api,
            resolver,
            start_time: chrono::Utc::now(),
        };

        Ok(Self {
            app: Self::create_router(state),
            addr,
        })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            // Health endpoints (no envelope consumers depend on these)
            .route("/health", get(handlers::health::health_check))
            .route("/live", get(handlers::health::liveness_check))
            // OpenAPI documentation
            .merge(
                SwaggerUi::new("/swagger-ui")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
            // API v1 routes
            .nest("/api/v1", Self::api_v1_routes())
            // Thumbnail reverse proxy (non-API content serving)
            .route(
                "/canto-thumbnail/{scheme}/{id}",
                get(handlers::thumbnails::serve_thumbnail),
            )
            // Bundled placeholder images
            .route(
                "/assets/images/{file}",
                get(handlers::static_assets::serve_image),
            )
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    fn api_v1_routes() -> Router<AppState> {
        Router::new()
            .route("/search", post(handlers::search::search_assets))
            .route("/assets/by-filename", get(handlers::search::find_by_filename))
            .route("/assets/{id}", get(handlers::assets::get_asset))
            .route("/format-value", get(handlers::search::format_value))
            .route("/tree", get(handlers::tree::get_tree_root))
            .route("/tree/{id}", get(handlers::tree::get_tree))
            .route("/albums/{id}/assets", get(handlers::tree::get_album_assets))
            .route("/cache", delete(handlers::assets::clear_cache))
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Bind and serve until shutdown
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}
