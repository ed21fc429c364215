//! Workflow execution error types.
//!
//! Used by `Node::run` and `CompiledStateGraph::invoke`.

use thiserror::Error;

/// Workflow execution error.
///
/// Returned when a graph step fails. Tool runtime failures (e.g. the code
/// interpreter raising an exception) are NOT errors: they are rendered as
/// tool-result text so agents can read and react to them. Only structural
/// failures surface here.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A tool call named a tool that is not registered.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A tool call carried arguments that could not be parsed as JSON,
    /// or the message had no pending tool call to execute.
    #[error("malformed tool call: {0}")]
    MalformedToolCall(String),

    /// The upstream model call failed (after any configured retries).
    #[error("model call failed: {0}")]
    Model(String),

    /// Execution failed with a message (e.g. tool transport exhausted retries).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The graph ran more steps than the configured limit without reaching
    /// a terminal transition.
    #[error("step limit exceeded: {0} steps without termination")]
    StepLimitExceeded(usize),
}
