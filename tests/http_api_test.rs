//! End-to-end exercises of the HTTP surface against a file-backed state
//! (no mirror), driven through the router without binding a socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use jurisgraph::graph::{Category, GraphDocument, GraphStore, Node, Relationship};
use jurisgraph::http::{AppState, HttpServer, ADMIN_TOKEN_HEADER};
use jurisgraph::mirror::InteractionSink;
use jurisgraph::persistence::{self, InteractionLog};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::RwLock;
use tower::util::ServiceExt;

fn fixture_document() -> GraphDocument {
    GraphDocument {
        nodes: vec![
            Node::new("R", "国际法知识图谱", Category::CoreQuestion, 0),
            Node::new("A", "国际法主体", Category::CoreQuestion, 1),
            Node::new("B", "条约法", Category::CoreQuestion, 1),
            Node::new("a1", "国家要素", Category::TheoryBasis, 2),
        ],
        relationships: vec![
            Relationship::new("R", "A", "包含"),
            Relationship::new("R", "B", "包含"),
            Relationship::new("A", "a1", "包含"),
            Relationship::new("A", "B", "关联"),
        ],
    }
}

fn test_state(dir: &TempDir) -> Arc<AppState> {
    let doc = fixture_document();
    let graph_path = dir.path().join("graph.json");
    persistence::save_document(&graph_path, &doc).unwrap();

    Arc::new(AppState {
        store: RwLock::new(GraphStore::from_document(doc)),
        sink: InteractionSink::new(None, InteractionLog::new(dir.path().join("log.json"))),
        mirror: None,
        graph_path,
        admin_token: "secret".to_string(),
        default_depth: 2,
        startup_warning: RwLock::new(None),
    })
}

async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = HttpServer::router(Arc::clone(state))
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_admin(
    state: &Arc<AppState>,
    uri: &str,
    token: &str,
) -> (StatusCode, serde_json::Value) {
    let resp = HttpServer::router(Arc::clone(state))
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(ADMIN_TOKEN_HEADER, token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(
    state: &Arc<AppState>,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(token) = token {
        builder = builder.header(ADMIN_TOKEN_HEADER, token);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    let resp = HttpServer::router(Arc::clone(state))
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_status_reports_counts() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = get(&state, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["graph"]["nodes"], 4);
    assert_eq!(body["graph"]["relationships"], 4);
    assert_eq!(body["mirror_connected"], false);
}

#[tokio::test]
async fn test_graph_topic_filter_bounds_depth() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = get(&state, "/api/graph?topic=A&depth=1").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["R", "A", "B", "a1"]);

    // No topic: everything.
    let (_, body) = get(&state, "/api/graph").await;
    assert_eq!(body["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(body["relationships"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_meta_lists_topics_and_legend() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (_, body) = get(&state, "/api/graph/meta").await;
    assert_eq!(body["root"]["id"], "R");
    let topics: Vec<&str> = body["core_questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(topics, vec!["A", "B"]);
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_node_detail_and_404() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = get(&state, "/api/nodes/a1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "国家要素");
    assert_eq!(body["type"], "");

    let (status, body) = get(&state, "/api/nodes/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_neighborhood_suppresses_direct_topic_link() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (_, body) = get(&state, "/api/nodes/A/neighborhood").await;
    let nodes: Vec<&str> = body["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(nodes.contains(&"B"), "B reachable through the root");
    let has_direct = body["relationships"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["source"] == "A" && r["target"] == "B");
    assert!(!has_direct, "direct topic link must stay dark");
}

#[tokio::test]
async fn test_record_interaction_validates_and_persists() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, _) = post(
        &state,
        "/api/interactions",
        None,
        Some(serde_json::json!({ "student_id": "", "node_id": "a1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &state,
        "/api/interactions",
        None,
        Some(serde_json::json!({ "student_id": "s1", "node_id": "a1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["mirror"]["status"], "skipped");
    assert_eq!(body["report"]["file"]["status"], "ok");

    let records = state.sink.log().read_all().unwrap();
    assert_eq!(records.len(), 1);
    // Label denormalized from the live graph.
    assert_eq!(records[0].node_label, "国家要素");
    assert_eq!(records[0].action_type, "view");
}

#[tokio::test]
async fn test_admin_requires_token() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, _) = get(&state, "/api/admin/analytics").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = get_admin(&state, "/api/admin/analytics", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A wrong attempt does not lock the right one out.
    let (status, _) = get_admin(&state, "/api/admin/analytics", "secret").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_analytics_over_recorded_events() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    for (student, node) in [("s1", "a1"), ("s1", "A"), ("s1", "a1"), ("s2", "gone")] {
        let (status, _) = post(
            &state,
            "/api/interactions",
            None,
            Some(serde_json::json!({ "student_id": student, "node_id": node })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get_admin(&state, "/api/admin/analytics", "secret").await;
    assert_eq!(body["source"], "file");
    assert_eq!(body["summary"]["total"], 4);
    assert_eq!(body["summary"]["distinct_students"], 2);
    assert_eq!(body["summary"]["distinct_nodes"], 3);
    assert!(body["summary"]["mean_duration"].is_null());
    assert_eq!(body["top_nodes"][0]["node_id"], "a1");
    assert_eq!(body["top_nodes"][0]["count"], 2);
    assert_eq!(body["top_students"][0]["student_id"], "s1");
    assert_eq!(body["top_students"][0]["count"], 3);
    // The dangling node lands in the unknown bucket.
    assert_eq!(body["by_category"]["unknown"], 1);
    assert_eq!(body["by_category"]["TheoryBasis"], 2);
    assert_eq!(body["students"], serde_json::json!(["s1", "s2"]));

    let (_, body) = get_admin(&state, "/api/admin/students/s1", "secret").await;
    assert_eq!(body["detail"]["total_visits"], 3);
    assert_eq!(body["detail"]["visited_node_count"], 2);
    assert_eq!(body["learning_path"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_clear_interactions_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    post(
        &state,
        "/api/interactions",
        None,
        Some(serde_json::json!({ "student_id": "s1", "node_id": "a1" })),
    )
    .await;

    let (status, body) = post(&state, "/api/admin/interactions/clear", Some("secret"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["interactions"]["file"]["status"], "ok");

    // Clearing the already-empty log succeeds again.
    let (status, _) = post(&state, "/api/admin/interactions/clear", Some("secret"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.sink.log().read_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_wipe_clears_graph_and_log() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir);

    let (status, body) = post(&state, "/api/admin/wipe", Some("secret"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["graph_file"]["status"], "ok");
    assert_eq!(body["mirror_graph"]["status"], "skipped");

    let (_, body) = get(&state, "/api/status").await;
    assert_eq!(body["graph"]["nodes"], 0);

    // The blank warehouse landed on disk.
    let doc = persistence::load_document(&state.graph_path).unwrap();
    assert!(doc.is_empty());

    // Wiping again is a no-op.
    let (status, _) = post(&state, "/api/admin/wipe", Some("secret"), None).await;
    assert_eq!(status, StatusCode::OK);
}
