//! Runner trait — the seam between callers and execution backends
//!
//! The gateway and CLI talk to a `dyn Runner` and never care whether the
//! code runs on the local host or on a remote judge. Implementations are
//! total: every failure is folded into the result shape, so callers never
//! branch on `Err`.

use async_trait::async_trait;

use crate::result::{ExecutionRequest, ExecutionResult};

/// An execution backend.
#[async_trait]
pub trait Runner: Send + Sync {
    /// Short stable identifier, used in logs and the CLI.
    fn name(&self) -> &str;

    /// Execute one request to completion.
    async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult;
}
