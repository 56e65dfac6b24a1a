//! HTTP server wiring for the browse and admin surfaces

use axum::{
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use rust_embed::RustEmbed;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handler::{
    analytics_handler, clear_interactions_handler, graph_handler, meta_handler,
    neighborhood_handler, node_handler, record_handler, reinit_handler, related_handler,
    status_handler, student_handler, wipe_handler,
};
use crate::graph::GraphStore;
use crate::mirror::{InteractionSink, Neo4jMirror};

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn static_handler() -> impl IntoResponse {
    let index_html = Assets::get("index.html").unwrap();
    Html(std::str::from_utf8(index_html.data.as_ref()).unwrap().to_string())
}

/// Shared per-process state; everything request-scoped stays in the
/// request itself.
pub struct AppState {
    pub store: RwLock<GraphStore>,
    pub sink: InteractionSink,
    pub mirror: Option<Arc<Neo4jMirror>>,
    pub graph_path: PathBuf,
    pub admin_token: String,
    pub default_depth: usize,
    /// Diagnostic from a degraded startup (missing/malformed document),
    /// surfaced inline on the browse view
    pub startup_warning: RwLock<Option<String>>,
}

/// HTTP server managing the API and the embedded browse page
pub struct HttpServer {
    state: Arc<AppState>,
    address: String,
    port: u16,
}

impl HttpServer {
    pub fn new(state: Arc<AppState>, address: impl Into<String>, port: u16) -> Self {
        Self {
            state,
            address: address.into(),
            port,
        }
    }

    /// Build the full route table. Public so tests can drive the router
    /// without binding a socket.
    pub fn router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", get(static_handler))
            .route("/api/status", get(status_handler))
            .route("/api/graph", get(graph_handler))
            .route("/api/graph/meta", get(meta_handler))
            .route("/api/nodes/:id", get(node_handler))
            .route("/api/nodes/:id/neighborhood", get(neighborhood_handler))
            .route("/api/nodes/:id/related", get(related_handler))
            .route("/api/interactions", post(record_handler))
            .route("/api/admin/analytics", get(analytics_handler))
            .route("/api/admin/students/:id", get(student_handler))
            .route("/api/admin/reinit", post(reinit_handler))
            .route(
                "/api/admin/interactions/clear",
                post(clear_interactions_handler),
            )
            .route("/api/admin/wipe", post(wipe_handler))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the HTTP server
    pub async fn start(&self) -> anyhow::Result<()> {
        let app = Self::router(Arc::clone(&self.state));

        let addr = format!("{}:{}", self.address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("browse view available at http://{addr}/");

        axum::serve(listener, app).await?;

        Ok(())
    }
}
