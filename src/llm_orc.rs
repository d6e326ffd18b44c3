//! llm-orc client — access to externally hosted summarization and
//! classification ensembles
//!
//! Defines the client trait and response types for calling llm-orc ensembles.
//! Two implementations:
//! - `SubprocessClient`: runs `llm-orc invoke` once per call (production)
//! - `MockClient`: returns preconfigured responses (testing)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;

/// Agent name preferred when an ensemble returns several successful agents.
pub const SYNTHESIZER_AGENT: &str = "synthesizer";

/// Result of invoking an llm-orc ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    /// Per-agent results (agent name → output)
    pub results: HashMap<String, AgentResult>,
    /// Overall execution status
    pub status: String,
    /// Execution metadata (timing, usage)
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl InvokeResponse {
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }

    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }

    /// The single answer this ensemble produced.
    ///
    /// A lone successful agent answers for the ensemble; with several, the
    /// `synthesizer` agent does. Anything else is ambiguous.
    pub fn primary_response(&self) -> Result<&str, LlmOrcError> {
        if self.is_failed() {
            let reasons: Vec<&str> = self
                .results
                .values()
                .filter_map(|r| r.error.as_deref())
                .collect();
            return Err(LlmOrcError::InvocationFailed(if reasons.is_empty() {
                "ensemble reported failure".to_string()
            } else {
                reasons.join("; ")
            }));
        }

        let successful: Vec<(&String, &str)> = self
            .results
            .iter()
            .filter(|(_, r)| r.is_success())
            .filter_map(|(name, r)| r.response.as_deref().map(|resp| (name, resp)))
            .collect();

        match successful.as_slice() {
            [] => Err(LlmOrcError::ParseError(
                "no successful agent response".to_string(),
            )),
            [(_, only)] => Ok(*only),
            many => many
                .iter()
                .find(|(name, _)| name.as_str() == SYNTHESIZER_AGENT)
                .map(|(_, resp)| *resp)
                .ok_or_else(|| {
                    LlmOrcError::ParseError(format!(
                        "{} agents responded and none is '{}'",
                        many.len(),
                        SYNTHESIZER_AGENT
                    ))
                }),
        }
    }
}

/// Result from a single agent in an ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    /// The agent's response text or JSON
    #[serde(default)]
    pub response: Option<String>,
    /// Agent status
    #[serde(default)]
    pub status: Option<String>,
    /// Error message if the agent failed
    #[serde(default)]
    pub error: Option<String>,
}

impl AgentResult {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Errors from llm-orc client operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmOrcError {
    #[error("llm-orc not available: {0}")]
    Unavailable(String),
    #[error("ensemble not found: {0}")]
    EnsembleNotFound(String),
    #[error("invocation failed: {0}")]
    InvocationFailed(String),
    #[error("response parse error: {0}")]
    ParseError(String),
}

/// Client trait for calling llm-orc ensembles.
///
/// Abstracts over transport (subprocess, mock) so the analysis backends
/// don't depend on how llm-orc is reached.
#[async_trait]
pub trait LlmOrcClient: Send + Sync {
    /// Check if llm-orc is reachable.
    async fn is_available(&self) -> bool;

    /// Invoke an ensemble with input data.
    async fn invoke(
        &self,
        ensemble_name: &str,
        input_data: &str,
    ) -> Result<InvokeResponse, LlmOrcError>;
}

/// Production client: one `llm-orc invoke` subprocess per call.
///
/// The process is awaited to completion; there is no timeout.
#[derive(Debug, Clone)]
pub struct SubprocessClient {
    binary: PathBuf,
    project_dir: Option<PathBuf>,
}

impl Default for SubprocessClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SubprocessClient {
    /// Client for the `llm-orc` found on `PATH`.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("llm-orc"),
            project_dir: None,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Directory holding the `.llm-orc/` ensemble configuration.
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(dir) = &self.project_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd
    }
}

/// Parse `llm-orc` stdout, tolerating log lines around the JSON document.
fn parse_invoke_output(stdout: &str) -> Result<InvokeResponse, LlmOrcError> {
    let trimmed = stdout.trim();
    if let Ok(resp) = serde_json::from_str::<InvokeResponse>(trimmed) {
        return Ok(resp);
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<InvokeResponse>(&trimmed[start..=end])
                .map_err(|e| LlmOrcError::ParseError(e.to_string()))
        }
        _ => Err(LlmOrcError::ParseError(format!(
            "no JSON document in llm-orc output ({} bytes)",
            stdout.len()
        ))),
    }
}

#[async_trait]
impl LlmOrcClient for SubprocessClient {
    async fn is_available(&self) -> bool {
        match self.command().arg("--version").output().await {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    async fn invoke(
        &self,
        ensemble_name: &str,
        input_data: &str,
    ) -> Result<InvokeResponse, LlmOrcError> {
        tracing::debug!(ensemble = ensemble_name, bytes = input_data.len(), "invoking llm-orc");

        let output = self
            .command()
            .args([
                "invoke",
                ensemble_name,
                "--input-data",
                input_data,
                "--output-format",
                "json",
            ])
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => LlmOrcError::Unavailable(format!(
                    "'{}' not found",
                    self.binary.display()
                )),
                _ => LlmOrcError::InvocationFailed(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.to_lowercase().contains("not found") && stderr.contains(ensemble_name) {
                return Err(LlmOrcError::EnsembleNotFound(ensemble_name.to_string()));
            }
            return Err(LlmOrcError::InvocationFailed(format!(
                "llm-orc exited with {}: {}",
                output.status, stderr
            )));
        }

        parse_invoke_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Mock client for testing — returns preconfigured responses and records
/// every invocation.
pub struct MockClient {
    available: bool,
    responses: HashMap<String, Result<InvokeResponse, LlmOrcError>>,
    invocations: Mutex<Vec<(String, String)>>,
}

impl MockClient {
    /// Create a mock client that reports as available.
    pub fn available() -> Self {
        Self {
            available: true,
            responses: HashMap::new(),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client that reports as unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    /// Register a response for a specific ensemble name.
    pub fn with_response(
        mut self,
        ensemble_name: impl Into<String>,
        response: InvokeResponse,
    ) -> Self {
        self.responses.insert(ensemble_name.into(), Ok(response));
        self
    }

    /// Register a failure for a specific ensemble name.
    pub fn with_failure(mut self, ensemble_name: impl Into<String>, error: LlmOrcError) -> Self {
        self.responses.insert(ensemble_name.into(), Err(error));
        self
    }

    /// `(ensemble, input)` pairs in call order.
    pub fn invocations(&self) -> Vec<(String, String)> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmOrcClient for MockClient {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn invoke(
        &self,
        ensemble_name: &str,
        input_data: &str,
    ) -> Result<InvokeResponse, LlmOrcError> {
        if let Ok(mut calls) = self.invocations.lock() {
            calls.push((ensemble_name.to_string(), input_data.to_string()));
        }

        if !self.available {
            return Err(LlmOrcError::Unavailable(
                "mock client configured as unavailable".to_string(),
            ));
        }

        match self.responses.get(ensemble_name) {
            Some(result) => result.clone(),
            None => Err(LlmOrcError::EnsembleNotFound(format!(
                "no mock response for ensemble '{}'",
                ensemble_name
            ))),
        }
    }
}

/// Helper to construct a completed InvokeResponse for testing.
pub fn mock_response(agents: Vec<(&str, &str)>) -> InvokeResponse {
    let results = agents
        .into_iter()
        .map(|(name, response)| {
            (
                name.to_string(),
                AgentResult {
                    response: Some(response.to_string()),
                    status: Some("success".to_string()),
                    error: None,
                },
            )
        })
        .collect();
    InvokeResponse {
        results,
        status: "completed".to_string(),
        metadata: serde_json::Value::Null,
    }
}
