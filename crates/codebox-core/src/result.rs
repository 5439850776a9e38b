//! Execution request and result shapes shared by every runner

use serde::{Deserialize, Serialize};

use crate::error::SandboxError;
use crate::language::Language;

/// One request to compile-and-run a piece of source code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub language: Language,
    pub source: String,
    /// Piped to the child process's standard input. Defaults to empty.
    #[serde(default)]
    pub stdin: String,
}

impl ExecutionRequest {
    pub fn new(language: Language, source: impl Into<String>) -> Self {
        Self {
            language,
            source: source.into(),
            stdin: String::new(),
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = stdin.into();
        self
    }

    /// Build a request from an untyped language tag, as received on the HTTP
    /// and CLI boundaries. Rejects unsupported tags before any filesystem or
    /// process activity.
    pub fn parse(
        language: &str,
        source: impl Into<String>,
        stdin: impl Into<String>,
    ) -> Result<Self, SandboxError> {
        let language: Language = language.parse()?;
        Ok(Self {
            language,
            source: source.into(),
            stdin: stdin.into(),
        })
    }
}

/// The uniform three-field outcome of an execution request.
///
/// Exactly one of these holds per request:
/// - a run happened: `stdout`/`stderr` are the process's own streams,
///   verbatim, and `compile_output` carries the compiler's diagnostics
///   (possibly empty) when a compile phase completed;
/// - compilation failed: `compile_output` carries the diagnostics and both
///   streams are empty;
/// - the sandbox itself could not run the request: `stderr` carries a
///   descriptive message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// `None` when no compile phase ran (interpreted languages, requests
    /// rejected up front). `Some` whenever a compile step completed, so
    /// compiler warnings survive even on success.
    pub compile_output: Option<String>,
}

impl ExecutionResult {
    /// An error-shaped result: the message lands in `stderr`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            compile_output: None,
        }
    }

    /// A compile-failure result: diagnostics only, the run phase never starts.
    pub fn compile_failure(diagnostics: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            compile_output: Some(diagnostics.into()),
        }
    }
}
