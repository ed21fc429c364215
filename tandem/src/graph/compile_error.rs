//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the graph is structurally invalid.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Validation ensures the entry point is set and registered, every fixed edge
/// targets a registered node, and every node has exactly one outgoing route
/// (a fixed edge or a conditional router, never both, never neither).
#[derive(Debug, Error)]
pub enum CompilationError {
    /// An edge references a node id that was not registered via `add_node`.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// `set_entry_point` was never called.
    #[error("graph has no entry point")]
    MissingEntryPoint,

    /// A node has no outgoing edge and no conditional router, so the run
    /// could reach it and have nowhere to go.
    #[error("node has no outgoing route: {0}")]
    MissingOutgoingEdge(String),

    /// A node has both a fixed edge and a conditional router.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),
}
