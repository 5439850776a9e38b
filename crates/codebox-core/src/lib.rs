//! codebox-core — multi-language code execution sandbox
//!
//! Accepts source code, a target language, and optional stdin; compiles
//! when the language needs it and runs the program in an ephemeral
//! workspace under bounded timeouts; returns stdout, stderr, and compiler
//! diagnostics as separate fields. Execution backends (local host, remote
//! judge) sit behind the [`Runner`] trait, and every failure is folded
//! into the uniform [`ExecutionResult`] shape rather than surfaced as
//! `Err`.

pub mod config;
pub mod doctor;
pub mod error;
pub mod harness;
pub mod language;
pub mod remote;
pub mod result;
pub mod runner;
pub mod sandbox;

pub use config::{Backend, CodeboxConfig, GatewayConfig, RemoteConfig};
pub use error::SandboxError;
pub use language::Language;
pub use remote::RemoteJudge;
pub use result::{ExecutionRequest, ExecutionResult};
pub use runner::Runner;
pub use sandbox::{ExecutionPolicy, LocalSandbox};
