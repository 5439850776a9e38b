//! Configuration — TOML-backed settings for sandbox, gateway, and judge
//!
//! Every field has a default, so an absent file, an empty file, and a file
//! setting only the keys you care about all work. The CLI loads one
//! `CodeboxConfig` and hands its sections to the components that need them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sandbox::ExecutionPolicy;

/// Which execution backend the gateway and CLI drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Run code directly on this host. Development default; executes
    /// arbitrary code with the server's privileges.
    #[default]
    Local,
    /// Submit code to a Judge0-compatible service.
    Remote,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Local => write!(f, "local"),
            Backend::Remote => write!(f, "remote"),
        }
    }
}

/// Settings for the HTTP gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Address the server listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// How many executions may be in flight at once; further requests queue.
    #[serde(default = "default_max_concurrent_executions")]
    pub max_concurrent_executions: usize,
    /// Execution backend for `/run-code/`.
    #[serde(default)]
    pub backend: Backend,
    /// Exact origins allowed by CORS. Empty means permissive.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_bind() -> String {
    "127.0.0.1:8700".to_string()
}

fn default_max_concurrent_executions() -> usize {
    4
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_concurrent_executions: default_max_concurrent_executions(),
            backend: Backend::default(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Settings for the remote judge client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of a Judge0-compatible service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout for one submission.
    #[serde(default = "default_remote_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://ce.judge0.com".to_string()
}

fn default_remote_timeout_secs() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_remote_timeout_secs(),
        }
    }
}

/// Top-level configuration, one section per component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeboxConfig {
    #[serde(default)]
    pub sandbox: ExecutionPolicy,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl CodeboxConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    /// A named file that cannot be read or parsed is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodeboxConfig::default();
        assert_eq!(config.gateway.bind, "127.0.0.1:8700");
        assert_eq!(config.gateway.max_concurrent_executions, 4);
        assert_eq!(config.gateway.backend, Backend::Local);
        assert!(config.gateway.allowed_origins.is_empty());
        assert_eq!(config.remote.base_url, "https://ce.judge0.com");
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.sandbox.run_timeout_secs, 10);
    }

    #[test]
    fn test_empty_toml_matches_defaults() {
        let config: CodeboxConfig = toml::from_str("").unwrap();
        assert_eq!(config.gateway.bind, "127.0.0.1:8700");
        assert_eq!(config.remote.timeout_secs, 30);
        assert_eq!(config.sandbox.compile_timeout_secs, 20);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml = r#"
[sandbox]
run_timeout_secs = 5

[gateway]
backend = "remote"
allowed_origins = ["http://localhost:3000"]

[remote]
base_url = "http://judge.internal:2358"
"#;
        let config: CodeboxConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sandbox.run_timeout_secs, 5);
        // Untouched keys keep their defaults.
        assert_eq!(config.sandbox.compile_timeout_secs, 20);
        assert_eq!(config.gateway.backend, Backend::Remote);
        assert_eq!(config.gateway.allowed_origins.len(), 1);
        assert_eq!(config.remote.base_url, "http://judge.internal:2358");
        assert_eq!(config.remote.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result: Result<CodeboxConfig, _> = toml::from_str("[gateway]\nbackend = \"docker\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = CodeboxConfig::load(Path::new("/nonexistent/codebox.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = CodeboxConfig::load_or_default(None).unwrap();
        assert_eq!(config.gateway.backend, Backend::Local);
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codebox.toml");
        let mut config = CodeboxConfig::default();
        config.gateway.bind = "0.0.0.0:9000".to_string();
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

        let loaded = CodeboxConfig::load(&path).unwrap();
        assert_eq!(loaded.gateway.bind, "0.0.0.0:9000");
        assert_eq!(loaded.remote.base_url, "https://ce.judge0.com");
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(Backend::Local.to_string(), "local");
        assert_eq!(Backend::Remote.to_string(), "remote");
    }
}
