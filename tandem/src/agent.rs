//! LLM-backed agent node.
//!
//! An [`Agent`] wraps an injected [`LlmClient`] with a name and a system
//! prompt. As a graph node it prepends its prompt to the shared conversation,
//! invokes the model, and returns a delta carrying one attributed assistant
//! message plus a sender claim. Routing is left to the graph's edges.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Node, RetryPolicy};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::{
    collaboration_prompt, CHART_GENERATOR_MESSAGE, ECONOMIST_MESSAGE, PSYCHOLOGIST_MESSAGE,
    RESEARCHER_MESSAGE, SOCIOLOGIST_MESSAGE,
};
use crate::state::AgentState;

/// One collaborating agent: a name, a system prompt, and an LLM client.
///
/// **Interaction**: Registered in a `StateGraph<AgentState>` under its name;
/// the relay's conditional edges read the messages it emits.
pub struct Agent {
    name: String,
    system_prompt: String,
    llm: Arc<dyn LlmClient>,
    retry: RetryPolicy,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            llm,
            retry: RetryPolicy::None,
        }
    }

    /// Retry policy for model calls. Only `AgentError::Model` is retried;
    /// other failures surface immediately.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Researcher: searches the web and hands data to the chart generator.
    pub fn researcher(llm: Arc<dyn LlmClient>) -> Self {
        Self::new(
            "Researcher",
            collaboration_prompt(&["tavily_search"], RESEARCHER_MESSAGE),
            llm,
        )
    }

    /// Chart Generator: turns gathered data into charts via the code tool.
    pub fn chart_generator(llm: Arc<dyn LlmClient>) -> Self {
        Self::new(
            "Chart Generator",
            collaboration_prompt(&["python_repl"], CHART_GENERATOR_MESSAGE),
            llm,
        )
    }

    pub fn psychologist(llm: Arc<dyn LlmClient>) -> Self {
        Self::new(
            "Psychologist",
            collaboration_prompt(&["tavily_search"], PSYCHOLOGIST_MESSAGE),
            llm,
        )
    }

    pub fn sociologist(llm: Arc<dyn LlmClient>) -> Self {
        Self::new(
            "Sociologist",
            collaboration_prompt(&["tavily_search"], SOCIOLOGIST_MESSAGE),
            llm,
        )
    }

    pub fn economist(llm: Arc<dyn LlmClient>) -> Self {
        Self::new(
            "Economist",
            collaboration_prompt(&["tavily_search"], ECONOMIST_MESSAGE),
            llm,
        )
    }

    async fn invoke_with_retry(
        &self,
        messages: &[Message],
    ) -> Result<crate::llm::LlmResponse, AgentError> {
        let mut attempt = 0;
        loop {
            match self.llm.invoke(messages).await {
                Ok(response) => return Ok(response),
                Err(AgentError::Model(msg)) if self.retry.should_retry(attempt) => {
                    let delay = self.retry.delay(attempt);
                    tracing::warn!(
                        agent = %self.name,
                        attempt = attempt + 1,
                        error = %msg,
                        "model call failed, retrying"
                    );
                    if delay > Duration::ZERO {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl Node<AgentState> for Agent {
    fn id(&self) -> &str {
        &self.name
    }

    async fn run(&self, state: AgentState) -> Result<AgentState, AgentError> {
        let mut conversation = Vec::with_capacity(state.messages.len() + 1);
        conversation.push(Message::system(&self.system_prompt));
        conversation.extend(state.messages.iter().cloned());

        let response = self.invoke_with_retry(&conversation).await?;
        tracing::debug!(
            agent = %self.name,
            has_tool_call = response.tool_call.is_some(),
            "agent turn complete"
        );

        let mut message = Message::assistant(response.content).with_name(&self.name);
        if let Some(call) = response.tool_call {
            message = message.with_tool_call(call);
        }

        Ok(AgentState {
            messages: vec![message],
            sender: Some(self.name.clone()),
        })
    }
}
