//! Two-agent relay workflow: Researcher and Chart Generator collaborating
//! over a shared tool node.
//!
//! The wiring mirrors a baton pass. After each agent turn a shared router
//! decides: a pending tool call goes to the tool node, a FINAL ANSWER ends
//! the run, anything else hands the conversation to the peer. The tool node
//! never claims the sender, so its outgoing route returns to whichever agent
//! asked for the tool.

use std::sync::Arc;

use crate::agent::Agent;
use crate::error::AgentError;
use crate::graph::{
    CompilationError, CompiledStateGraph, EdgeRouterFn, StateGraph, Transition,
};
use crate::router::{route, RouteDecision};
use crate::state::{AgentState, MergeUpdater};
use crate::tool_node::{ToolNode, TOOL_NODE};
use crate::tools::ToolRegistry;

/// Node id of the Researcher agent.
pub const RESEARCHER: &str = "Researcher";

/// Node id of the Chart Generator agent.
pub const CHART_GENERATOR: &str = "Chart Generator";

/// Router for the tool node's outgoing edge: return to whichever agent the
/// state names as sender. A missing sender means the tool node ran before
/// any agent turn; the run ends rather than guessing a target.
fn return_to_sender(state: &AgentState) -> Transition {
    match state.sender.as_deref() {
        Some(sender) => Transition::to(sender),
        None => {
            tracing::warn!("tool node ran with no sender recorded, ending run");
            Transition::End
        }
    }
}

/// Maps the shared route decision onto this relay's topology for one agent:
/// tool calls go to the tool node, FINAL ANSWER ends, otherwise the peer
/// takes over.
fn agent_edge(peer: String) -> EdgeRouterFn<AgentState> {
    Arc::new(move |state| match route(state) {
        RouteDecision::CallTool => Transition::to(TOOL_NODE),
        RouteDecision::End => Transition::End,
        RouteDecision::Continue => Transition::to(peer.clone()),
    })
}

/// Builds and compiles the relay graph.
///
/// Both agents are registered under their own names so sender values double
/// as node ids. The entry point is the first agent passed in. Any agent pair
/// works; [`RESEARCHER`] and [`CHART_GENERATOR`] name the standard one.
pub fn build_relay_graph(
    first: Agent,
    second: Agent,
    registry: Arc<ToolRegistry>,
    max_steps: usize,
) -> Result<CompiledStateGraph<AgentState>, CompilationError> {
    let first_id = first.name().to_string();
    let second_id = second.name().to_string();

    let mut graph = StateGraph::new()
        .with_state_updater(Arc::new(MergeUpdater))
        .with_max_steps(max_steps);

    graph.add_node(first_id.clone(), Arc::new(first));
    graph.add_node(second_id.clone(), Arc::new(second));
    graph.add_node(TOOL_NODE, Arc::new(ToolNode::new(registry)));

    graph.add_conditional_edges(first_id.clone(), agent_edge(second_id.clone()));
    graph.add_conditional_edges(second_id, agent_edge(first_id.clone()));
    graph.add_conditional_edges(TOOL_NODE, Arc::new(return_to_sender));

    graph.set_entry_point(first_id);
    graph.compile()
}

/// Convenience runner: a compiled relay plus a one-call entry point that
/// seeds the state from a user task.
pub struct RelayRunner {
    graph: CompiledStateGraph<AgentState>,
}

impl RelayRunner {
    /// Builds a relay that starts at the first agent.
    pub fn new(
        first: Agent,
        second: Agent,
        registry: Arc<ToolRegistry>,
        max_steps: usize,
    ) -> Result<Self, CompilationError> {
        let graph = build_relay_graph(first, second, registry, max_steps)?;
        Ok(Self { graph })
    }

    /// Runs the relay on a user task and returns the final merged state.
    pub async fn invoke(&self, task: impl Into<String>) -> Result<AgentState, AgentError> {
        self.graph
            .invoke(AgentState::from_user_message(task))
            .await
    }
}
