//! Execution policy — time limits and resource constraints for the local sandbox

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Limits applied to every execution request handled by the local sandbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPolicy {
    /// Time limit for the compile phase (compiled languages only).
    #[serde(default = "default_compile_timeout_secs")]
    pub compile_timeout_secs: u64,
    /// Time limit for the run phase.
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,
    /// Requests with larger source are rejected before any filesystem work.
    #[serde(default = "default_max_source_bytes")]
    pub max_source_bytes: usize,
    /// Parent directory for per-request workspaces. Defaults to the system
    /// temp directory when unset.
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,
}

fn default_compile_timeout_secs() -> u64 {
    20
}

fn default_run_timeout_secs() -> u64 {
    10
}

fn default_max_source_bytes() -> usize {
    1024 * 1024 // 1 MiB
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            compile_timeout_secs: default_compile_timeout_secs(),
            run_timeout_secs: default_run_timeout_secs(),
            max_source_bytes: default_max_source_bytes(),
            workspace_root: None,
        }
    }
}

impl ExecutionPolicy {
    pub fn compile_timeout(&self) -> Duration {
        Duration::from_secs(self.compile_timeout_secs)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }
}
