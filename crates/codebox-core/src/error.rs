//! Sandbox error taxonomy
//!
//! Every variant's `Display` text is the exact message callers see in the
//! `stderr` field of an error-shaped [`ExecutionResult`]: errors never leave
//! the crate as `Err` values on the execution path, they are recovered into
//! the uniform result shape at the [`Runner`](crate::runner::Runner) boundary.

use thiserror::Error;

use crate::result::ExecutionResult;

/// Everything that can stop an execution request before or during a run.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// The language tag is not one of the four supported values.
    /// No filesystem or process activity has happened.
    #[error("Language {language} not supported.")]
    UnsupportedLanguage { language: String },

    /// The source exceeds the policy's size cap. Rejected up front.
    #[error("Source too large: {size} bytes (limit {limit}).")]
    SourceTooLarge { size: usize, limit: usize },

    /// A required interpreter/compiler is absent from `PATH`.
    /// No workspace has been created.
    #[error("{tool} not found on PATH.")]
    MissingToolchain { tool: &'static str },

    /// A compile or run phase exceeded its time limit. The process tree
    /// has been terminated and reaped; partial output is discarded.
    #[error("Execution timed out.")]
    Timeout,

    /// Any I/O or spawn failure while orchestrating the subprocess.
    #[error("Execution error: {0}")]
    Io(#[from] std::io::Error),
}

impl SandboxError {
    /// Recover the error into the uniform three-field result shape.
    pub fn into_result(self) -> ExecutionResult {
        ExecutionResult::error(self.to_string())
    }
}
