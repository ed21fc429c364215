//! # Tandem
//!
//! A multi-agent relay workflow library in Rust. Named LLM agents take turns
//! on one shared conversation, calling tools through a common execution node,
//! until one of them declares a FINAL ANSWER.
//!
//! ## Design principles
//!
//! - **Single state type**: One [`AgentState`] (messages plus sender) flows
//!   through every node; nodes return deltas, never the whole state.
//! - **Routing lives on edges**: Nodes only produce messages. A pure
//!   [`route`] function inspects the merged state and conditional edges turn
//!   its decision into the next hop.
//! - **Explicit merge**: [`merge_state`] appends messages and updates the
//!   sender only when a delta claims one, so the tool node's silence routes
//!   execution back to the agent that asked for the tool.
//! - **Bounded runs**: Every invocation is capped by a step limit
//!   ([`DEFAULT_MAX_STEPS`]) instead of trusting agents to terminate.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`],
//!   [`Transition`], [`RetryPolicy`] — build and run state graphs.
//! - [`state`]: [`AgentState`], [`merge_state`], [`MergeUpdater`].
//! - [`agent`]: [`Agent`] — an LLM-backed node with a name and system prompt.
//! - [`router`]: [`route`], [`RouteDecision`], [`FINAL_ANSWER_MARKER`].
//! - [`tool_node`]: [`ToolNode`] — executes pending tool calls.
//! - [`tools`]: [`Tool`], [`ToolRegistry`], [`TavilySearch`], [`PythonRepl`].
//! - [`llm`]: [`LlmClient`] trait, [`ChatOpenAI`], [`ScriptedLlm`].
//! - [`relay`]: [`build_relay_graph`], [`RelayRunner`] — the wired two-agent
//!   workflow.
//! - [`prompts`]: collaboration preamble and role instructions.
//! - [`config`]: [`WorkflowConfig`] resolved from env vars and `.env`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tandem::{Agent, ChatOpenAI, RelayRunner, ToolRegistry, WorkflowConfig};
//! use tandem::tools::{PythonRepl, TavilySearch};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WorkflowConfig::from_env();
//!
//! let mut registry = ToolRegistry::new();
//! if let Some(key) = &config.tavily_api_key {
//!     registry.register(Box::new(TavilySearch::new(key)));
//! }
//! registry.register(Box::new(PythonRepl::new()));
//!
//! let llm = Arc::new(ChatOpenAI::new(&config.model).with_tools(registry.list()));
//!
//! let runner = RelayRunner::new(
//!     Agent::researcher(llm.clone()),
//!     Agent::chart_generator(llm),
//!     Arc::new(registry),
//!     config.max_steps,
//! )?;
//!
//! let state = runner
//!     .invoke("Fetch the UK's GDP over the past 5 years, then draw a line graph of it.")
//!     .await?;
//! if let Some(last) = state.last_message() {
//!     println!("{}", last.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod relay;
pub mod router;
pub mod state;
pub mod tool_node;
pub mod tools;

pub use agent::Agent;
pub use config::WorkflowConfig;
pub use error::AgentError;
pub use graph::{
    BoxedStateUpdater, CompilationError, CompiledStateGraph, EdgeRouterFn, Node, ReplaceUpdater,
    RetryPolicy, StateGraph, StateUpdater, Transition, DEFAULT_MAX_STEPS,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, ScriptedLlm};
pub use message::{Message, Role, ToolCallRequest};
pub use relay::{build_relay_graph, RelayRunner, CHART_GENERATOR, RESEARCHER};
pub use router::{route, RouteDecision, FINAL_ANSWER_MARKER};
pub use state::{merge_state, AgentState, MergeUpdater};
pub use tool_node::{ToolNode, SOLE_ARG_KEY, TOOL_NODE};
pub use tools::{PythonRepl, TavilySearch, Tool, ToolError, ToolRegistry, ToolSpec};
