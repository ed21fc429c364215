//! State graph builder: nodes plus fixed and conditional edges.
//!
//! Add nodes with `add_node`, pick the first node with `set_entry_point`,
//! wire routes with `add_edge` (fixed [`Transition`]) or
//! `add_conditional_edges` (a router over the merged state). Then `compile`
//! to get an executable [`CompiledStateGraph`].
//!
//! # Routing
//!
//! A node has exactly one outgoing route: either a fixed transition or a
//! conditional router, never both. Termination is always an explicit
//! `Transition::End`; there is no sentinel node id for the exit.
//!
//! # State updates
//!
//! By default a node's return value replaces the state. Install a custom
//! [`StateUpdater`] with `with_state_updater` to merge deltas instead (e.g.
//! append messages).

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::{CompiledStateGraph, RouteEntry};
use crate::graph::node::Node;
use crate::graph::retry::RetryPolicy;
use crate::graph::transition::{EdgeRouterFn, Transition};
use crate::graph::updater::{BoxedStateUpdater, ReplaceUpdater, StateUpdater};

/// Default cap on run-loop steps; keeps cyclic graphs from spinning forever.
pub const DEFAULT_MAX_STEPS: usize = 25;

/// Mutable graph under construction. Generic over state type `S`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    entry_point: Option<String>,
    /// Fixed outgoing transitions: node id -> transition taken after it runs.
    edges: HashMap<String, Transition>,
    /// Conditional outgoing routes: node id -> router over the merged state.
    conditional_edges: HashMap<String, EdgeRouterFn<S>>,
    state_updater: Option<BoxedStateUpdater<S>>,
    retry_policy: RetryPolicy,
    max_steps: usize,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            entry_point: None,
            edges: HashMap::new(),
            conditional_edges: HashMap::new(),
            state_updater: None,
            retry_policy: RetryPolicy::None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Installs a custom state updater controlling how node deltas merge
    /// into the accumulated state. Default is [`ReplaceUpdater`].
    pub fn with_state_updater(self, updater: Arc<dyn StateUpdater<S>>) -> Self {
        Self {
            state_updater: Some(updater),
            ..self
        }
    }

    /// Sets the retry policy applied to every node execution.
    /// Default is `RetryPolicy::None` (fail on first error).
    pub fn with_retry_policy(self, retry_policy: RetryPolicy) -> Self {
        Self {
            retry_policy,
            ..self
        }
    }

    /// Overrides the step limit (default [`DEFAULT_MAX_STEPS`]). A run that
    /// takes more steps without reaching `Transition::End` fails with
    /// `AgentError::StepLimitExceeded`.
    pub fn with_max_steps(self, max_steps: usize) -> Self {
        Self { max_steps, ..self }
    }

    /// Adds a node; id must be unique. Replaces if same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Names the node where every run starts.
    pub fn set_entry_point(&mut self, id: impl Into<String>) -> &mut Self {
        self.entry_point = Some(id.into());
        self
    }

    /// Adds a fixed outgoing transition for `from`.
    ///
    /// Use `Transition::to(id)` to continue at another node or
    /// `Transition::End` to terminate after `from` runs. A node may have one
    /// fixed edge or conditional edges, not both.
    pub fn add_edge(&mut self, from: impl Into<String>, to: Transition) -> &mut Self {
        self.edges.insert(from.into(), to);
        self
    }

    /// Adds a conditional route from `source`: after the node runs and its
    /// delta is merged, `router` is called with the updated state and its
    /// transition is taken. Routers may return any registered node id or
    /// `Transition::End`.
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        router: EdgeRouterFn<S>,
    ) -> &mut Self {
        self.conditional_edges.insert(source.into(), router);
        self
    }

    /// Validates the graph and produces an immutable executable form.
    ///
    /// Checks: the entry point is set and registered; every fixed edge's
    /// source and `To` target are registered; every node has exactly one
    /// outgoing route. Conditional routers are opaque, so ids they return
    /// are checked at runtime instead.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let entry_point = self.entry_point.ok_or(CompilationError::MissingEntryPoint)?;
        if !self.nodes.contains_key(&entry_point) {
            return Err(CompilationError::NodeNotFound(entry_point));
        }

        for (from, to) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if let Transition::To(target) = to {
                if !self.nodes.contains_key(target) {
                    return Err(CompilationError::NodeNotFound(target.clone()));
                }
            }
        }
        for source in self.conditional_edges.keys() {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if self.edges.contains_key(source) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(
                    source.clone(),
                ));
            }
        }
        for id in self.nodes.keys() {
            if !self.edges.contains_key(id) && !self.conditional_edges.contains_key(id) {
                return Err(CompilationError::MissingOutgoingEdge(id.clone()));
            }
        }

        let mut routes: HashMap<String, RouteEntry<S>> = self
            .edges
            .into_iter()
            .map(|(from, to)| (from, RouteEntry::Fixed(to)))
            .collect();
        for (source, router) in self.conditional_edges {
            routes.insert(source, RouteEntry::Conditional(router));
        }

        let state_updater = self
            .state_updater
            .unwrap_or_else(|| Arc::new(ReplaceUpdater));

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            entry_point,
            routes,
            state_updater,
            retry_policy: self.retry_policy,
            max_steps: self.max_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::AgentError;

    #[derive(Clone)]
    struct DummyNode(&'static str);

    #[async_trait]
    impl Node<i32> for DummyNode {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(&self, state: i32) -> Result<i32, AgentError> {
            Ok(state)
        }
    }

    /// **Scenario**: compile without set_entry_point fails with MissingEntryPoint.
    #[test]
    fn compile_without_entry_point_fails() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.add_edge("a", Transition::End);
        let err = graph.compile().err().expect("should fail");
        assert!(matches!(err, CompilationError::MissingEntryPoint));
    }

    /// **Scenario**: Entry point naming an unregistered node fails with NodeNotFound.
    #[test]
    fn compile_unknown_entry_point_fails() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.add_edge("a", Transition::End);
        graph.set_entry_point("missing");
        let err = graph.compile().err().expect("should fail");
        assert!(matches!(err, CompilationError::NodeNotFound(id) if id == "missing"));
    }

    /// **Scenario**: A fixed edge targeting an unregistered node fails with NodeNotFound.
    #[test]
    fn compile_edge_to_unknown_node_fails() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.set_entry_point("a");
        graph.add_edge("a", Transition::to("ghost"));
        let err = graph.compile().err().expect("should fail");
        assert!(matches!(err, CompilationError::NodeNotFound(id) if id == "ghost"));
    }

    /// **Scenario**: A node with both a fixed edge and a conditional router is rejected.
    #[test]
    fn compile_node_with_both_edge_kinds_fails() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.set_entry_point("a");
        graph.add_edge("a", Transition::End);
        graph.add_conditional_edges("a", Arc::new(|_: &i32| Transition::End));
        let err = graph.compile().err().expect("should fail");
        assert!(matches!(
            err,
            CompilationError::NodeHasBothEdgeAndConditional(id) if id == "a"
        ));
    }

    /// **Scenario**: A node with no outgoing route at all is rejected as a dead end.
    #[test]
    fn compile_node_without_outgoing_route_fails() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.add_node("sink", Arc::new(DummyNode("sink")));
        graph.set_entry_point("a");
        graph.add_edge("a", Transition::to("sink"));
        let err = graph.compile().err().expect("should fail");
        assert!(matches!(err, CompilationError::MissingOutgoingEdge(id) if id == "sink"));
    }

    /// **Scenario**: A well-formed graph compiles.
    #[test]
    fn compile_valid_graph_succeeds() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("a", Arc::new(DummyNode("a")));
        graph.add_node("b", Arc::new(DummyNode("b")));
        graph.set_entry_point("a");
        graph.add_edge("a", Transition::to("b"));
        graph.add_conditional_edges("b", Arc::new(|_: &i32| Transition::End));
        assert!(graph.compile().is_ok());
    }
}
