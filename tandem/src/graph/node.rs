//! Node trait: one unit of work in a state graph.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::AgentError;

/// A single unit of work in a state graph.
///
/// A node receives a snapshot of the current state and returns a delta-shaped
/// state; the graph merges the delta with the configured [`StateUpdater`]
/// (crate::graph::StateUpdater). Nodes do not choose their successor: routing
/// happens on edges after the merge.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Stable identifier used for registration, routing, and logs.
    fn id(&self) -> &str;

    /// Runs the node against a snapshot of the state, returning a delta.
    async fn run(&self, state: S) -> Result<S, AgentError>;
}
