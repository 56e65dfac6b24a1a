use jurisgraph::config::AppConfig;
use jurisgraph::graph::GraphStore;
use jurisgraph::http::{AppState, HttpServer};
use jurisgraph::mirror::{self, InteractionSink};
use jurisgraph::persistence::{self, InteractionLog};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    // A missing or broken document is not fatal: serve an empty graph and
    // surface the diagnostic on the browse view.
    let (document, startup_warning) = match persistence::load_document(&config.graph_path) {
        Ok(doc) => (doc, None),
        Err(e) => {
            warn!(error = %e, "starting with an empty graph");
            (Default::default(), Some(e.to_string()))
        }
    };
    let store = GraphStore::from_document(document);
    info!(
        nodes = store.node_count(),
        relationships = store.relationship_count(),
        topics = store.core_questions().len(),
        "knowledge graph ready"
    );

    let mirror = mirror::connect(&config.mirror).await;
    let sink = InteractionSink::new(mirror.clone(), InteractionLog::new(&config.log_path));

    let state = Arc::new(AppState {
        store: RwLock::new(store),
        sink,
        mirror,
        graph_path: config.graph_path.clone(),
        admin_token: config.admin_token.clone(),
        default_depth: config.max_depth,
        startup_warning: RwLock::new(startup_warning),
    });

    HttpServer::new(state, config.address.clone(), config.port)
        .start()
        .await
}
