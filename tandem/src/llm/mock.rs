//! Scripted LLM for tests: replays a fixed queue of responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// LLM that replays a pre-written script of responses in order.
///
/// Each `invoke()` pops the next response; an exhausted script returns
/// `AgentError::Model` so a runaway workflow fails loudly instead of
/// looping on a stale reply.
pub struct ScriptedLlm {
    script: Mutex<VecDeque<LlmResponse>>,
}

impl ScriptedLlm {
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
        }
    }

    /// Remaining responses in the script.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AgentError::Model("scripted responses exhausted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Responses come back in script order, then the script is
    /// exhausted and invoke returns Err.
    #[tokio::test]
    async fn replays_in_order_then_errors() {
        let llm = ScriptedLlm::new(vec![
            LlmResponse::text("first"),
            LlmResponse::tool("python_repl", r#"{"code":"print(1)"}"#),
        ]);
        assert_eq!(llm.remaining(), 2);

        let first = llm.invoke(&[]).await.unwrap();
        assert_eq!(first.content, "first");

        let second = llm.invoke(&[]).await.unwrap();
        assert_eq!(second.tool_call.unwrap().name, "python_repl");

        let err = llm.invoke(&[]).await.unwrap_err();
        assert!(matches!(err, AgentError::Model(_)));
    }
}
