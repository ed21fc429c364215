//! Tool system: trait, specs, registry, and the built-in tools.
//!
//! Tools are injected into workflows through a [`ToolRegistry`]; nothing in
//! this crate reaches for a global tool table. The registry retries
//! transient transport failures with the configured [`RetryPolicy`]
//! (crate::graph::RetryPolicy).

mod code;
mod search;

pub use code::PythonRepl;
pub use search::{TavilySearch, DEFAULT_MAX_RESULTS};

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::graph::RetryPolicy;

/// Tool invocation error.
///
/// `Transport` is the only transient variant; the registry retries it.
/// Note that tool RUNTIME failures (e.g. submitted code raising an
/// exception) are not errors at all: tools render them as result text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's expected shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A network or protocol failure reaching the tool's backend.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Declarative description of a tool, sent upstream so the model can call it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Unique tool name used for dispatch.
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: Option<String>,
    /// JSON Schema of the expected arguments.
    pub input_schema: serde_json::Value,
}

/// An executable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Dispatch name; must match `spec().name`.
    fn name(&self) -> &str;

    /// Spec advertised to the model.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool. `args` is either a JSON object matching the
    /// spec's schema or, for single-argument tools, a bare JSON string
    /// (the tool node collapses one-key `__arg1` objects before dispatch).
    async fn call(&self, args: serde_json::Value) -> Result<String, ToolError>;
}

/// Registry of tools keyed by name.
///
/// Dispatches calls and retries `ToolError::Transport` per the configured
/// retry policy. Other error kinds fail immediately: a missing tool or bad
/// input will not improve on retry.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    retry_policy: RetryPolicy,
}

impl ToolRegistry {
    /// Creates an empty registry with no retries.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            retry_policy: RetryPolicy::None,
        }
    }

    /// Sets the retry policy applied to transport failures.
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Registers a tool. Replaces any tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Specs of all registered tools.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec()).collect()
    }

    /// Dispatches a call to the named tool, retrying transport failures.
    pub async fn invoke(&self, name: &str, args: serde_json::Value) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        let mut attempt = 0;
        loop {
            match tool.call(args.clone()).await {
                Ok(text) => return Ok(text),
                Err(ToolError::Transport(msg)) if self.retry_policy.should_retry(attempt) => {
                    let delay = self.retry_policy.delay(attempt);
                    tracing::warn!(
                        tool = name,
                        attempt,
                        error = %msg,
                        "transient tool failure, retrying"
                    );
                    if delay > std::time::Duration::ZERO {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
