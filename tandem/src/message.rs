//! Conversation message types shared by all agents.
//!
//! Every message carries a role, text content, an optional author name (set by
//! agent nodes so routing can attribute turns), and an optional pending tool
//! call. Messages are never mutated once appended to state; builders produce
//! new values.

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Role {
    /// System prompt; placed first in the request sent upstream.
    System,
    /// Human input that seeded the run.
    Human,
    /// An agent's reply (possibly carrying a tool call).
    Assistant,
    /// Output of a tool execution, framed for the next agent to read.
    Tool,
}

/// A tool invocation requested by an agent.
///
/// `arguments` is the raw JSON text exactly as the model produced it; parsing
/// is deferred to the tool execution node so a malformed payload is reported
/// at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolCallRequest {
    /// Registered tool name.
    pub name: String,
    /// JSON text of the arguments, unparsed.
    pub arguments: String,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: Role,
    /// Text content.
    pub content: String,
    /// Author name (agent or tool); None for human input.
    pub name: Option<String>,
    /// Pending tool call, when the author requested one.
    pub tool_call: Option<ToolCallRequest>,
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            name: None,
            tool_call: None,
        }
    }

    /// Creates a human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
            name: None,
            tool_call: None,
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            name: None,
            tool_call: None,
        }
    }

    /// Creates a tool-result message attributed to the tool that produced it.
    pub fn tool_result(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            name: Some(tool_name.into()),
            tool_call: None,
        }
    }

    /// Sets the author name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches a pending tool call (builder).
    pub fn with_tool_call(mut self, call: ToolCallRequest) -> Self {
        self.tool_call = Some(call);
        self
    }
}
