//! HTTP handlers for the browse and admin surfaces
//!
//! There is no session state: browse parameters arrive as query params
//! and the admin secret as a header, checked per request. Failures inside
//! a handler degrade to a payload with a `diagnostic` field; only bad
//! input, unknown ids and a bad admin token become error statuses.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use super::server::AppState;
use crate::algo;
use crate::analytics::{self, InteractionRecord};
use crate::graph::{Category, NodeId};
use crate::mirror::WriteOutcome;
use crate::persistence;

/// Admin shared-secret header
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

const TOP_N: usize = 10;
const LEARNING_PATH_LIMIT: usize = 20;

/// Error responses surfaced to the client
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "invalid admin token".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn require_admin(headers: &HeaderMap, state: &AppState) -> Result<(), ApiError> {
    let token = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if token == state.admin_token {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Handler for system status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "graph": {
            "nodes": store.node_count(),
            "relationships": store.relationship_count(),
        },
        "mirror_connected": state.mirror.is_some(),
        "diagnostic": *state.startup_warning.read().await,
    }))
}

#[derive(Deserialize)]
pub struct GraphQuery {
    /// Focus topic; absent means the whole graph
    pub topic: Option<String>,
    pub depth: Option<usize>,
}

/// Handler for the browse view's graph payload
pub async fn graph_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GraphQuery>,
) -> impl IntoResponse {
    let depth = params.depth.unwrap_or(state.default_depth);
    let focus = params.topic.map(NodeId::from);

    let store = state.store.read().await;
    let sub = algo::select(&store, focus.as_ref(), depth);
    Json(json!({
        "nodes": sub.nodes,
        "relationships": sub.relationships,
        "diagnostic": *state.startup_warning.read().await,
    }))
}

/// Sidebar data: the root, the topic menu and the category legend
pub async fn meta_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read().await;
    let categories: Vec<serde_json::Value> = Category::ALL
        .iter()
        .map(|c| json!({ "name": c.as_str(), "color": c.color() }))
        .collect();
    Json(json!({
        "root": store.root(),
        "core_questions": store.core_questions(),
        "categories": categories,
    }))
}

/// Detail card for one node
pub async fn node_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let store = state.store.read().await;
    let id = NodeId::from(id);
    match store.find_by_id(&id) {
        Some(node) => Ok(Json(node.clone()).into_response()),
        None => Err(ApiError::NotFound(format!("unknown node {id}"))),
    }
}

#[derive(Deserialize)]
pub struct DepthQuery {
    pub depth: Option<usize>,
}

/// Node and relationship identities to light up around a click
pub async fn neighborhood_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<DepthQuery>,
) -> impl IntoResponse {
    let depth = params.depth.unwrap_or(state.default_depth);
    let store = state.store.read().await;
    let set = algo::highlight(&store, &NodeId::from(id), depth);

    // Sets come out hash-ordered; sort for a stable payload.
    let mut nodes: Vec<NodeId> = set.nodes.into_iter().collect();
    nodes.sort();
    let mut relationships: Vec<_> = set.relationships.into_iter().collect();
    relationships.sort();
    Json(json!({ "nodes": nodes, "relationships": relationships }))
}

/// The human-readable related-links list for the detail panel
pub async fn related_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<DepthQuery>,
) -> impl IntoResponse {
    let depth = params.depth.unwrap_or(state.default_depth);
    let store = state.store.read().await;
    Json(algo::related_chain(&store, &NodeId::from(id), depth))
}

#[derive(Deserialize)]
pub struct InteractionRequest {
    pub student_id: String,
    pub node_id: String,
    pub node_label: Option<String>,
    pub action_type: Option<String>,
    #[serde(default)]
    pub duration: u64,
}

/// Record one student view event through the dual-write sink
pub async fn record_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InteractionRequest>,
) -> Result<Response, ApiError> {
    if req.student_id.trim().is_empty() {
        return Err(ApiError::BadRequest("student_id is required".into()));
    }
    if req.node_id.trim().is_empty() {
        return Err(ApiError::BadRequest("node_id is required".into()));
    }

    let node_id = NodeId::from(req.node_id);
    // Denormalize the label at record time; fall back to the live graph,
    // then to the raw id for nodes the graph no longer knows.
    let label = match req.node_label {
        Some(label) if !label.is_empty() => label,
        _ => {
            let store = state.store.read().await;
            store
                .find_by_id(&node_id)
                .map(|n| n.label.clone())
                .unwrap_or_else(|| node_id.to_string())
        }
    };

    let record = InteractionRecord::new(
        req.student_id,
        node_id,
        label,
        req.action_type.unwrap_or_else(|| "view".to_string()),
        req.duration,
    );
    let token = record.token();
    let report = state.sink.record(&record).await;
    if !report.recorded() {
        warn!(%token, "interaction event lost on both stores");
    }
    Ok(Json(json!({ "token": token, "report": report })).into_response())
}

/// Admin dashboard payload: headline counters, rankings, distributions
pub async fn analytics_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    require_admin(&headers, &state)?;

    let (records, source, diagnostic) = state.sink.fetch().await;
    let store = state.store.read().await;
    let by_category = analytics::by_category(&records, |id| {
        store.find_by_id(id).map(|n| n.category)
    });

    Ok(Json(json!({
        "source": source,
        "diagnostic": diagnostic,
        "summary": analytics::summary(&records),
        "top_nodes": analytics::top_by_node(&records, TOP_N),
        "top_students": analytics::top_by_student(&records, TOP_N),
        "by_category": by_category,
        "students": analytics::students(&records),
    }))
    .into_response())
}

/// Per-student drill-down with the learning path
pub async fn student_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(student_id): Path<String>,
) -> Result<Response, ApiError> {
    require_admin(&headers, &state)?;

    let (records, source, diagnostic) = state.sink.fetch().await;
    let detail = analytics::student_detail(&records, &student_id);
    let learning_path = detail.learning_path(LEARNING_PATH_LIMIT);
    Ok(Json(json!({
        "source": source,
        "diagnostic": diagnostic,
        "student_id": student_id,
        "detail": detail,
        "learning_path": learning_path,
    }))
    .into_response())
}

/// Re-initialize the mirror graph from the current document
pub async fn reinit_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    require_admin(&headers, &state)?;

    let mirror_outcome = match &state.mirror {
        Some(mirror) => {
            let doc = state.store.read().await.to_document();
            match mirror.init_graph(&doc).await {
                Ok(()) => {
                    info!(nodes = doc.nodes.len(), "mirror graph re-initialized");
                    WriteOutcome::Ok
                }
                Err(e) => {
                    warn!(error = %e, "mirror re-initialization failed");
                    WriteOutcome::Failed(e.to_string())
                }
            }
        }
        None => WriteOutcome::Skipped,
    };
    Ok(Json(json!({ "mirror": mirror_outcome })).into_response())
}

/// Clear interaction records in both stores
pub async fn clear_interactions_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    require_admin(&headers, &state)?;
    let report = state.sink.clear().await;
    Ok(Json(json!({ "interactions": report })).into_response())
}

/// Wipe everything: graph and interactions, both stores. The document is
/// replaced by a blank data warehouse ready for editing.
pub async fn wipe_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    require_admin(&headers, &state)?;

    let mirror_graph = match &state.mirror {
        Some(mirror) => match mirror.clear_graph().await {
            Ok(()) => WriteOutcome::Ok,
            Err(e) => WriteOutcome::Failed(e.to_string()),
        },
        None => WriteOutcome::Skipped,
    };
    let interactions = state.sink.clear().await;

    let empty = crate::graph::GraphDocument::empty();
    let graph_file = match persistence::save_document(&state.graph_path, &empty) {
        Ok(()) => WriteOutcome::Ok,
        Err(e) => {
            warn!(error = %e, "writing blank graph document failed");
            WriteOutcome::Failed(e.to_string())
        }
    };
    state.store.write().await.clear();
    // Wiped data also clears any stale startup diagnostic.
    *state.startup_warning.write().await = None;

    info!("data warehouse wiped");
    Ok(Json(json!({
        "mirror_graph": mirror_graph,
        "interactions": interactions,
        "graph_file": graph_file,
    }))
    .into_response())
}
