//! Judge0-compatible remote judge client
//!
//! The alternative [`Runner`] backend for deployments that must not execute
//! untrusted code on the host. Speaks the Judge0 submissions wire format:
//! one synchronous POST with base64-encoded source and stdin, base64 text
//! fields decoded back out of the response.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::language::Language;
use crate::result::{ExecutionRequest, ExecutionResult};
use crate::runner::Runner;

/// Client for a Judge0-compatible submissions API.
#[derive(Debug, Clone)]
pub struct RemoteJudge {
    client: Client,
    base_url: String,
}

/// Submission body for the `/submissions/` endpoint.
#[derive(Debug, Serialize)]
struct Submission {
    language_id: u32,
    source_code: String,
    stdin: String,
}

/// Judge0 submission response; every text field arrives base64-encoded.
#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    #[serde(default)]
    stdout: Option<String>,
    #[serde(default)]
    stderr: Option<String>,
    #[serde(default)]
    compile_output: Option<String>,
}

/// Judge0 language ids for the supported languages.
fn language_id(language: Language) -> u32 {
    match language {
        Language::Python => 71,
        Language::Javascript => 63,
        Language::Cpp => 54,
        Language::Java => 62,
    }
}

impl RemoteJudge {
    /// Create a client for the configured Judge0-compatible service.
    pub fn new(config: &RemoteConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn submit(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        let submission = Submission {
            language_id: language_id(request.language),
            source_code: BASE64.encode(&request.source),
            stdin: BASE64.encode(&request.stdin),
        };

        debug!(
            language = %request.language,
            base_url = %self.base_url,
            "remote judge submission"
        );

        let url = format!(
            "{}/submissions/?base64_encoded=true&wait=true",
            self.base_url
        );
        let response = self
            .client
            .post(&url)
            .json(&submission)
            .send()
            .await
            .context("Failed to send submission to remote judge")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Remote judge returned status {status}: {body}");
        }

        let body: SubmissionResponse = response
            .json()
            .await
            .context("Failed to parse remote judge response")?;

        decode_response(body)
    }
}

#[async_trait]
impl Runner for RemoteJudge {
    fn name(&self) -> &str {
        "remote"
    }

    async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        match self.submit(request).await {
            Ok(result) => result,
            Err(err) => {
                warn!("remote judge request failed: {err:#}");
                ExecutionResult::error(format!("Remote judge error: {err:#}"))
            }
        }
    }
}

/// Decode the base64 text fields into the uniform result shape.
fn decode_response(response: SubmissionResponse) -> Result<ExecutionResult> {
    let compile_output = match response.compile_output.as_deref() {
        Some(field) => Some(decode_field(field)?),
        None => None,
    };

    Ok(ExecutionResult {
        stdout: response.stdout.as_deref().map_or(Ok(String::new()), decode_field)?,
        stderr: response.stderr.as_deref().map_or(Ok(String::new()), decode_field)?,
        compile_output,
    })
}

/// Judge0 line-wraps its base64 output; strip whitespace before decoding.
fn decode_field(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .context("Remote judge returned invalid base64")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
