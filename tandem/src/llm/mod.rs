//! LLM client abstraction for agent nodes.
//!
//! Agent nodes depend on a callable that returns assistant text and an
//! optional tool call; this module defines the trait, the OpenAI-backed
//! implementation, and a scripted mock for tests.

mod mock;
mod openai;

pub use mock::ScriptedLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{Message, ToolCallRequest};

/// Response from an LLM completion: assistant text and an optional tool call.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; the agent node writes
/// `content` into a new assistant message and carries `tool_call` alongside it
/// so the router can dispatch to the tool node.
#[derive(Clone, Debug)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
    /// Tool invocation requested this turn; None means plain text.
    pub tool_call: Option<ToolCallRequest>,
}

impl LlmResponse {
    /// Plain-text response with no tool call.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_call: None,
        }
    }

    /// Response requesting a tool invocation.
    pub fn tool(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            tool_call: Some(ToolCallRequest {
                name: name.into(),
                arguments: arguments.into(),
            }),
        }
    }
}

/// LLM client: given messages, returns assistant text and an optional tool call.
///
/// Implementations: `ScriptedLlm` (fixed responses, for tests) and
/// `ChatOpenAI` (real Chat Completions API).
///
/// **Interaction**: Used by `Agent`; injected as `Arc<dyn LlmClient>` so
/// workflows can swap providers without touching the graph.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read the conversation, return the next assistant reply.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
