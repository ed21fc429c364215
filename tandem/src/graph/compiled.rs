//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds nodes, per-node routes, the state
//! updater, the retry policy, and the step limit.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::node::Node;
use crate::graph::retry::RetryPolicy;
use crate::graph::transition::{EdgeRouterFn, Transition};
use crate::graph::updater::BoxedStateUpdater;

/// Outgoing route of a node: a fixed transition or a conditional router.
pub(super) enum RouteEntry<S> {
    Fixed(Transition),
    Conditional(EdgeRouterFn<S>),
}

/// Compiled graph: immutable structure, supports `invoke` only.
///
/// Runs from the entry point. After each node, the delta is merged via the
/// state updater and the node's route yields the next [`Transition`]; the run
/// returns the accumulated state when a route yields `Transition::End`, or
/// fails with `StepLimitExceeded` once the step limit is hit.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) entry_point: String,
    pub(super) routes: HashMap<String, RouteEntry<S>>,
    pub(super) state_updater: BoxedStateUpdater<S>,
    pub(super) retry_policy: RetryPolicy,
    pub(super) max_steps: usize,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Runs a node, retrying per the configured policy. Each attempt gets a
    /// fresh clone of the pre-node state.
    async fn execute_node_with_retry(
        &self,
        node: Arc<dyn Node<S>>,
        state: &S,
    ) -> Result<S, AgentError> {
        let mut attempt = 0;
        loop {
            match node.run(state.clone()).await {
                Ok(delta) => return Ok(delta),
                Err(e) => {
                    if self.retry_policy.should_retry(attempt) {
                        let delay = self.retry_policy.delay(attempt);
                        tracing::warn!(
                            node = %node.id(),
                            attempt,
                            error = %e,
                            "node failed, retrying"
                        );
                        if delay > std::time::Duration::ZERO {
                            tokio::time::sleep(delay).await;
                        }
                        attempt += 1;
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Runs the graph with the given state until a route yields
    /// `Transition::End`, then returns the accumulated state.
    ///
    /// Fails with `AgentError::StepLimitExceeded` when the run takes more
    /// steps than the compiled limit, and with `ExecutionFailed` when a
    /// conditional router returns an id that is not a registered node.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        let mut state = state;
        let mut current = self.entry_point.clone();
        tracing::info!(entry = %current, "graph run start");

        for step in 0..self.max_steps {
            let node = self
                .nodes
                .get(&current)
                .cloned()
                .ok_or_else(|| {
                    AgentError::ExecutionFailed(format!("routed to unknown node: {}", current))
                })?;

            tracing::debug!(step, node = %current, "node start");
            let delta = self.execute_node_with_retry(node, &state).await?;
            self.state_updater.apply_update(&mut state, &delta);

            // compile() guarantees every registered node has a route;
            // only a router returning an unknown id can escape that.
            let transition = match self.routes.get(&current) {
                Some(RouteEntry::Fixed(t)) => t.clone(),
                Some(RouteEntry::Conditional(router)) => router(&state),
                None => {
                    return Err(AgentError::ExecutionFailed(format!(
                        "no route for node: {}",
                        current
                    )))
                }
            };

            match transition {
                Transition::To(next) => {
                    tracing::debug!(from = %current, to = %next, "transition");
                    current = next;
                }
                Transition::End => {
                    tracing::info!(steps = step + 1, "graph run complete");
                    return Ok(state);
                }
            }
        }

        tracing::warn!(max_steps = self.max_steps, "graph run exceeded step limit");
        Err(AgentError::StepLimitExceeded(self.max_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::graph::{StateGraph, Transition};

    #[derive(Clone)]
    struct AddNode {
        id: &'static str,
        delta: i32,
    }

    #[async_trait]
    impl Node<i32> for AddNode {
        fn id(&self) -> &str {
            self.id
        }
        async fn run(&self, state: i32) -> Result<i32, AgentError> {
            Ok(state + self.delta)
        }
    }

    fn build_two_step_graph() -> CompiledStateGraph<i32> {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("first", Arc::new(AddNode { id: "first", delta: 1 }));
        graph.add_node("second", Arc::new(AddNode { id: "second", delta: 2 }));
        graph.set_entry_point("first");
        graph.add_edge("first", Transition::to("second"));
        graph.add_edge("second", Transition::End);
        graph.compile().expect("graph compiles")
    }

    /// **Scenario**: A linear two-node graph runs both nodes and returns the final state.
    #[tokio::test]
    async fn invoke_linear_graph_runs_all_nodes() {
        let graph = build_two_step_graph();
        let out = graph.invoke(0).await.unwrap();
        assert_eq!(out, 3, "0 -> first(1) -> second(3)");
    }

    /// **Scenario**: Conditional edges route to different nodes based on state.
    #[tokio::test]
    async fn invoke_conditional_edges_routes_by_state() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("decide", Arc::new(AddNode { id: "decide", delta: 0 }));
        graph.add_node("even_node", Arc::new(AddNode { id: "even_node", delta: 10 }));
        graph.add_node("odd_node", Arc::new(AddNode { id: "odd_node", delta: 100 }));
        graph.set_entry_point("decide");
        graph.add_conditional_edges(
            "decide",
            Arc::new(|s: &i32| {
                if s % 2 == 0 {
                    Transition::to("even_node")
                } else {
                    Transition::to("odd_node")
                }
            }),
        );
        graph.add_edge("even_node", Transition::End);
        graph.add_edge("odd_node", Transition::End);
        let compiled = graph.compile().expect("graph compiles");

        assert_eq!(compiled.invoke(2).await.unwrap(), 12, "even -> +10");
        assert_eq!(compiled.invoke(1).await.unwrap(), 101, "odd -> +100");
    }

    /// **Scenario**: A router returning an unregistered node id fails the run
    /// with ExecutionFailed instead of panicking.
    #[tokio::test]
    async fn invoke_router_to_unknown_node_fails() {
        let mut graph = StateGraph::<i32>::new();
        graph.add_node("only", Arc::new(AddNode { id: "only", delta: 1 }));
        graph.set_entry_point("only");
        graph.add_conditional_edges("only", Arc::new(|_: &i32| Transition::to("ghost")));
        let compiled = graph.compile().expect("graph compiles");

        let result = compiled.invoke(0).await;
        match result {
            Err(AgentError::ExecutionFailed(msg)) => {
                assert!(msg.contains("ghost"), "{}", msg)
            }
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }

    /// **Scenario**: A cyclic graph that never ends fails with StepLimitExceeded
    /// after the configured number of steps.
    #[tokio::test]
    async fn invoke_cycle_hits_step_limit() {
        let calls = Arc::new(AtomicUsize::new(0));

        #[derive(Clone)]
        struct CountingNode(Arc<AtomicUsize>);

        #[async_trait]
        impl Node<i32> for CountingNode {
            fn id(&self) -> &str {
                "spin"
            }
            async fn run(&self, state: i32) -> Result<i32, AgentError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(state)
            }
        }

        let mut graph = StateGraph::<i32>::new().with_max_steps(5);
        graph.add_node("spin", Arc::new(CountingNode(calls.clone())));
        graph.set_entry_point("spin");
        graph.add_edge("spin", Transition::to("spin"));
        let compiled = graph.compile().expect("graph compiles");

        let result = compiled.invoke(0).await;
        assert!(matches!(result, Err(AgentError::StepLimitExceeded(5))));
        assert_eq!(calls.load(Ordering::SeqCst), 5, "one node run per step");
    }

    /// Node that fails a specified number of times before succeeding.
    #[derive(Clone)]
    struct FailingNode {
        fail_count: Arc<AtomicUsize>,
        max_failures: usize,
    }

    #[async_trait]
    impl Node<i32> for FailingNode {
        fn id(&self) -> &str {
            "failing"
        }
        async fn run(&self, state: i32) -> Result<i32, AgentError> {
            let current = self.fail_count.fetch_add(1, Ordering::SeqCst);
            if current < self.max_failures {
                Err(AgentError::ExecutionFailed(format!(
                    "deliberate failure {} of {}",
                    current + 1,
                    self.max_failures
                )))
            } else {
                Ok(state + 10)
            }
        }
    }

    /// **Scenario**: A node with a retry policy succeeds after transient failures.
    #[tokio::test]
    async fn invoke_with_retry_succeeds_after_failures() {
        let fail_count = Arc::new(AtomicUsize::new(0));
        let mut graph = StateGraph::<i32>::new()
            .with_retry_policy(RetryPolicy::fixed(3, std::time::Duration::from_millis(10)));
        graph.add_node(
            "failing",
            Arc::new(FailingNode {
                fail_count: fail_count.clone(),
                max_failures: 2,
            }),
        );
        graph.set_entry_point("failing");
        graph.add_edge("failing", Transition::End);
        let compiled = graph.compile().expect("graph compiles");

        let result = compiled.invoke(0).await.unwrap();
        assert_eq!(fail_count.load(Ordering::SeqCst), 3, "2 failures + 1 success");
        assert_eq!(result, 10);
    }

    /// **Scenario**: Without a retry policy the first node error aborts the run.
    #[tokio::test]
    async fn invoke_without_retry_fails_immediately() {
        let fail_count = Arc::new(AtomicUsize::new(0));
        let mut graph = StateGraph::<i32>::new();
        graph.add_node(
            "failing",
            Arc::new(FailingNode {
                fail_count: fail_count.clone(),
                max_failures: 2,
            }),
        );
        graph.set_entry_point("failing");
        graph.add_edge("failing", Transition::End);
        let compiled = graph.compile().expect("graph compiles");

        let result = compiled.invoke(0).await;
        assert_eq!(fail_count.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    /// **Scenario**: Retry attempts are exhausted and the last error surfaces.
    #[tokio::test]
    async fn invoke_with_retry_exhausted_fails() {
        let fail_count = Arc::new(AtomicUsize::new(0));
        let mut graph = StateGraph::<i32>::new()
            .with_retry_policy(RetryPolicy::fixed(2, std::time::Duration::from_millis(10)));
        graph.add_node(
            "failing",
            Arc::new(FailingNode {
                fail_count: fail_count.clone(),
                max_failures: 5,
            }),
        );
        graph.set_entry_point("failing");
        graph.add_edge("failing", Transition::End);
        let compiled = graph.compile().expect("graph compiles");

        let result = compiled.invoke(0).await;
        assert_eq!(fail_count.load(Ordering::SeqCst), 3, "initial + 2 retries");
        assert!(result.is_err());
    }

    #[derive(Clone, Debug, PartialEq)]
    struct LogState {
        entries: Vec<String>,
    }

    #[derive(Clone)]
    struct AppendNode {
        id: &'static str,
        entry: &'static str,
    }

    #[async_trait]
    impl Node<LogState> for AppendNode {
        fn id(&self) -> &str {
            self.id
        }
        async fn run(&self, _state: LogState) -> Result<LogState, AgentError> {
            Ok(LogState {
                entries: vec![self.entry.to_string()],
            })
        }
    }

    #[derive(Debug)]
    struct AppendUpdater;

    impl crate::graph::StateUpdater<LogState> for AppendUpdater {
        fn apply_update(&self, current: &mut LogState, update: &LogState) {
            current.entries.extend(update.entries.iter().cloned());
        }
    }

    /// **Scenario**: A custom StateUpdater accumulates node deltas instead of replacing.
    #[tokio::test]
    async fn invoke_with_custom_updater_accumulates() {
        let mut graph = StateGraph::<LogState>::new().with_state_updater(Arc::new(AppendUpdater));
        graph.add_node("first", Arc::new(AppendNode { id: "first", entry: "hello" }));
        graph.add_node("second", Arc::new(AppendNode { id: "second", entry: "world" }));
        graph.set_entry_point("first");
        graph.add_edge("first", Transition::to("second"));
        graph.add_edge("second", Transition::End);
        let compiled = graph.compile().expect("graph compiles");

        let out = compiled
            .invoke(LogState {
                entries: vec!["start".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(
            out.entries,
            vec!["start".to_string(), "hello".to_string(), "world".to_string()]
        );
    }

    /// **Scenario**: Default updater (replace) keeps only the last node's output.
    #[tokio::test]
    async fn invoke_default_updater_replaces() {
        let mut graph = StateGraph::<LogState>::new();
        graph.add_node("first", Arc::new(AppendNode { id: "first", entry: "hello" }));
        graph.add_node("second", Arc::new(AppendNode { id: "second", entry: "world" }));
        graph.set_entry_point("first");
        graph.add_edge("first", Transition::to("second"));
        graph.add_edge("second", Transition::End);
        let compiled = graph.compile().expect("graph compiles");

        let out = compiled
            .invoke(LogState {
                entries: vec!["start".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(out.entries, vec!["world".to_string()]);
    }
}
