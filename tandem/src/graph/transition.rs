//! Routing decisions produced after each node runs.

use std::sync::Arc;

/// Where the graph goes after a node completes.
///
/// Every route resolves to a tagged transition: either the id of the next
/// node or the explicit end of the run. There is no sentinel node id for
/// termination and no way for a node to route itself; only edges route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Continue at the node with this id.
    To(String),
    /// Terminate the run and return the accumulated state.
    End,
}

impl Transition {
    /// Shorthand for `Transition::To(id.into())`.
    pub fn to(id: impl Into<String>) -> Self {
        Transition::To(id.into())
    }
}

/// Conditional edge router: reads the merged state after the source node ran
/// and returns the transition to take.
pub type EdgeRouterFn<S> = Arc<dyn Fn(&S) -> Transition + Send + Sync>;
