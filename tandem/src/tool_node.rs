//! Shared tool-execution node.
//!
//! Executes the pending tool call found on the last message and appends the
//! framed result. The delta claims no sender, so after merging the state
//! still names the agent that asked for the tool and the relay's edge can
//! route straight back to it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;
use crate::message::Message;
use crate::state::AgentState;
use crate::tools::{ToolError, ToolRegistry};

/// Node id under which the tool executor is registered.
pub const TOOL_NODE: &str = "call_tool";

/// Argument key some models emit when a tool takes a single positional
/// argument. An object of exactly `{"__arg1": value}` collapses to `value`.
pub const SOLE_ARG_KEY: &str = "__arg1";

/// Graph node that dispatches the pending tool call through a [`ToolRegistry`].
pub struct ToolNode {
    registry: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Reads the pending invocation off the last message: the tool name and
    /// its arguments parsed from raw JSON text, with the single-argument
    /// wrapper collapsed.
    fn parse_invocation(state: &AgentState) -> Result<(String, serde_json::Value), AgentError> {
        let call = state
            .last_message()
            .and_then(|m| m.tool_call.as_ref())
            .ok_or_else(|| {
                AgentError::MalformedToolCall("no pending tool call on last message".to_string())
            })?;

        let args: serde_json::Value = serde_json::from_str(&call.arguments).map_err(|e| {
            AgentError::MalformedToolCall(format!(
                "arguments for {} are not valid JSON: {}",
                call.name, e
            ))
        })?;

        Ok((call.name.clone(), Self::collapse_single_arg(args)))
    }

    fn collapse_single_arg(args: serde_json::Value) -> serde_json::Value {
        match args {
            serde_json::Value::Object(mut map)
                if map.len() == 1 && map.contains_key(SOLE_ARG_KEY) =>
            {
                map.remove(SOLE_ARG_KEY).unwrap_or(serde_json::Value::Null)
            }
            other => other,
        }
    }
}

#[async_trait]
impl Node<AgentState> for ToolNode {
    fn id(&self) -> &str {
        TOOL_NODE
    }

    async fn run(&self, state: AgentState) -> Result<AgentState, AgentError> {
        let (name, args) = Self::parse_invocation(&state)?;
        tracing::debug!(tool = %name, "executing tool call");

        let result = match self.registry.invoke(&name, args).await {
            Ok(text) => text,
            Err(ToolError::NotFound(name)) => return Err(AgentError::UnknownTool(name)),
            Err(e) => return Err(AgentError::ExecutionFailed(e.to_string())),
        };

        let framed = format!("{} response: {}", name, result);
        Ok(AgentState {
            messages: vec![Message::tool_result(name, framed)],
            sender: None,
        })
    }
}
