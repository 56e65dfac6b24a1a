//! Neo4j mirror client over the HTTP transaction endpoint
//!
//! Everything here is best-effort: a mirror that cannot be reached at
//! startup is simply absent, and every later failure degrades to the
//! file-backed path. Course data is isolated under a dedicated label so
//! one database can host several courses; interaction records carry an
//! `Interaction_` prefix on that label.

use crate::analytics::InteractionRecord;
use crate::config::MirrorConfig;
use crate::error::{StoreError, StoreResult};
use crate::graph::GraphDocument;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::warn;

#[derive(Serialize)]
struct Statement {
    statement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<serde_json::Value>,
}

impl Statement {
    fn new(statement: impl Into<String>) -> Self {
        Statement {
            statement: statement.into(),
            parameters: None,
        }
    }

    fn with_params(statement: impl Into<String>, parameters: serde_json::Value) -> Self {
        Statement {
            statement: statement.into(),
            parameters: Some(parameters),
        }
    }
}

#[derive(Serialize)]
struct TxRequest {
    statements: Vec<Statement>,
}

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Deserialize)]
struct TxResult {
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Deserialize)]
struct TxRow {
    #[serde(default)]
    row: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct TxError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Client for one course's slice of a Neo4j instance
pub struct Neo4jMirror {
    client: Client,
    endpoint: String,
    user: String,
    password: String,
    label: String,
}

impl Neo4jMirror {
    pub fn new(config: &MirrorConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StoreError::StoreUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/db/{}/tx/commit",
                config.uri.trim_end_matches('/'),
                config.database
            ),
            user: config.user.clone(),
            password: config.password.clone(),
            label: config.label.clone(),
        })
    }

    /// One round trip, failing with `StoreUnavailable` on transport or
    /// Cypher errors.
    async fn commit(&self, statements: Vec<Statement>) -> StoreResult<TxResponse> {
        let resp = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.password))
            .json(&TxRequest { statements })
            .send()
            .await
            .map_err(|e| StoreError::StoreUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::StoreUnavailable(format!(
                "mirror returned HTTP {}",
                resp.status()
            )));
        }

        let body: TxResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::StoreUnavailable(e.to_string()))?;

        if let Some(err) = body.errors.first() {
            return Err(StoreError::StoreUnavailable(format!(
                "{}: {}",
                err.code, err.message
            )));
        }
        Ok(body)
    }

    /// Cheap connectivity check used at startup
    pub async fn probe(&self) -> StoreResult<()> {
        self.commit(vec![Statement::new("RETURN 1")]).await?;
        Ok(())
    }

    /// Wipe and re-create the course graph from the document.
    pub async fn init_graph(&self, doc: &GraphDocument) -> StoreResult<()> {
        self.clear_graph().await?;

        let mut statements = Vec::with_capacity(doc.nodes.len());
        for node in &doc.nodes {
            statements.push(Statement::with_params(
                format!(
                    "CREATE (n:{} {{id: $id, label: $label, category: $category, \
                     type: $type, level: $level, description: $description, \
                     properties: $properties}})",
                    self.label
                ),
                json!({
                    "id": node.id,
                    "label": node.label,
                    "category": node.category,
                    "type": node.node_type,
                    "level": node.level,
                    "description": node.description,
                    // Free-form bag travels as a JSON blob, order intact.
                    "properties": serde_json::to_string(&node.properties)?,
                }),
            ));
        }
        self.commit(statements).await?;

        let mut statements = Vec::with_capacity(doc.relationships.len());
        for rel in &doc.relationships {
            statements.push(Statement::with_params(
                format!(
                    "MATCH (a:{label} {{id: $source}}) MATCH (b:{label} {{id: $target}}) \
                     CREATE (a)-[r:RELATES {{type: $type, description: $description}}]->(b)",
                    label = self.label
                ),
                json!({
                    "source": rel.source,
                    "target": rel.target,
                    "type": rel.rel_type,
                    "description": rel.description,
                }),
            ));
        }
        self.commit(statements).await?;
        Ok(())
    }

    pub async fn insert_interaction(&self, rec: &InteractionRecord) -> StoreResult<()> {
        self.commit(vec![Statement::with_params(
            format!(
                "CREATE (i:Interaction_{} {{id: $id, student_id: $student_id, \
                 node_id: $node_id, node_label: $node_label, action_type: $action_type, \
                 duration: $duration, timestamp: $timestamp}})",
                self.label
            ),
            json!({
                "id": rec.token(),
                "student_id": rec.student_id,
                "node_id": rec.node_id,
                "node_label": rec.node_label,
                "action_type": rec.action_type,
                "duration": rec.duration,
                "timestamp": rec.timestamp.to_rfc3339(),
            }),
        )])
        .await?;
        Ok(())
    }

    /// All interaction records held by the mirror, newest first.
    /// Rows that fail to parse are skipped, matching the log-file policy.
    pub async fn fetch_interactions(&self) -> StoreResult<Vec<InteractionRecord>> {
        let body = self
            .commit(vec![Statement::new(format!(
                "MATCH (i:Interaction_{}) RETURN i.student_id, i.node_id, i.node_label, \
                 i.action_type, i.duration, i.timestamp ORDER BY i.timestamp DESC",
                self.label
            ))])
            .await?;

        let mut records = Vec::new();
        for row in body.results.into_iter().flat_map(|r| r.data) {
            match parse_interaction_row(&row.row) {
                Ok(rec) => records.push(rec),
                Err(e) => warn!(error = %e, "skipping malformed mirror interaction row"),
            }
        }
        Ok(records)
    }

    pub async fn clear_graph(&self) -> StoreResult<()> {
        self.commit(vec![Statement::new(format!(
            "MATCH (n:{}) DETACH DELETE n",
            self.label
        ))])
        .await?;
        Ok(())
    }

    pub async fn clear_interactions(&self) -> StoreResult<()> {
        self.commit(vec![Statement::new(format!(
            "MATCH (i:Interaction_{}) DELETE i",
            self.label
        ))])
        .await?;
        Ok(())
    }
}

fn parse_interaction_row(row: &[serde_json::Value]) -> StoreResult<InteractionRecord> {
    let field = |idx: usize| -> StoreResult<&serde_json::Value> {
        row.get(idx)
            .ok_or_else(|| StoreError::MalformedRecord(format!("row too short at column {idx}")))
    };
    let string = |idx: usize| -> StoreResult<String> {
        Ok(field(idx)?.as_str().unwrap_or_default().to_string())
    };

    let timestamp = field(5)?
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| StoreError::MalformedRecord("bad timestamp".into()))?;

    Ok(InteractionRecord {
        student_id: string(0)?,
        node_id: string(1)?.into(),
        node_label: string(2)?,
        action_type: string(3)?,
        duration: field(4)?.as_u64().unwrap_or(0),
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interaction_row() {
        let row = vec![
            json!("s1"),
            json!("n1"),
            json!("条约法"),
            json!("view"),
            json!(12),
            json!("2026-03-14T09:26:53+00:00"),
        ];
        let rec = parse_interaction_row(&row).unwrap();
        assert_eq!(rec.student_id, "s1");
        assert_eq!(rec.duration, 12);
    }

    #[test]
    fn test_parse_rejects_short_row() {
        assert!(parse_interaction_row(&[json!("s1")]).is_err());
    }

    #[test]
    fn test_endpoint_from_config() {
        let mirror = Neo4jMirror::new(&MirrorConfig {
            uri: "http://localhost:7474/".into(),
            ..MirrorConfig::default()
        })
        .unwrap();
        assert_eq!(mirror.endpoint, "http://localhost:7474/db/neo4j/tx/commit");
    }
}
