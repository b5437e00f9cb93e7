//! HTTP server for the dashboard page and its JSON API

use super::handler::{
    details_handler, elements_handler, geo_handler, lineage_handler, node_details_handler,
    options_handler, overview_handler, scatter_click_handler, scatter_handler,
    shared_tables_handler, status_handler, summary_handler, AppState, SharedState,
};
use crate::config::ServerConfig;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn static_handler() -> impl IntoResponse {
    match Assets::get("index.html") {
        Some(page) => Html(String::from_utf8_lossy(page.data.as_ref()).into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, "dashboard page missing").into_response(),
    }
}

/// Routes over an already-built state; used by the server and by tests
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(static_handler))
        .route("/api/status", get(status_handler))
        .route("/api/elements", get(elements_handler))
        .route("/api/overview", get(overview_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/options", get(options_handler))
        .route("/api/details", get(details_handler))
        .route("/api/nodes/:id", get(node_details_handler))
        .route("/api/scatter", get(scatter_handler))
        .route("/api/scatter/click", get(scatter_click_handler))
        .route("/api/geo", get(geo_handler))
        .route("/api/lineage", get(lineage_handler))
        .route("/api/lineage/shared-tables", get(shared_tables_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server over one immutable dataset snapshot
pub struct HttpServer {
    config: ServerConfig,
    state: SharedState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.state));

        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(
            entities = self.state.dataset.len(),
            "Dashboard available at http://{}", addr
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}
