//! Application configuration
//!
//! Defaults work out of the box against `data/`; a YAML file overrides
//! them, and the two secrets can come from the environment so they stay
//! out of checked-in config.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the admin shared secret
pub const ADMIN_TOKEN_ENV: &str = "JURISGRAPH_ADMIN_TOKEN";
/// Environment variable overriding the mirror password
pub const MIRROR_PASSWORD_ENV: &str = "JURISGRAPH_MIRROR_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Graph document path
    pub graph_path: PathBuf,
    /// Interaction log path
    pub log_path: PathBuf,
    /// Shared secret gating the admin surface
    pub admin_token: String,
    /// Default hop bound for the browse traversals
    pub max_depth: usize,
    pub mirror: MirrorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Setting this false skips the startup probe entirely
    pub enabled: bool,
    /// Base HTTP URI of the Neo4j instance
    pub uri: String,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Label isolating this course's data inside the instance
    pub label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8420,
            graph_path: PathBuf::from("data/knowledge_graph.json"),
            log_path: PathBuf::from("data/interactions_log.json"),
            admin_token: "admin888".to_string(),
            max_depth: crate::algo::DEFAULT_MAX_DEPTH,
            mirror: MirrorConfig::default(),
        }
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            uri: "http://localhost:7474".to_string(),
            database: "neo4j".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            label: "InternationalLaw".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a YAML file when given, else defaults; then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                let config: AppConfig = serde_yaml::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?;
                info!(path = %path.display(), "configuration loaded");
                config
            }
            None => AppConfig::default(),
        };

        if let Ok(token) = std::env::var(ADMIN_TOKEN_ENV) {
            config.admin_token = token;
        }
        if let Ok(password) = std::env::var(MIRROR_PASSWORD_ENV) {
            config.mirror.password = password;
        }
        Ok(config)
    }
}
