//! Conditional state graph: nodes, edges, compilation, and the run loop.
//!
//! Build a [`StateGraph`], register nodes and edges, then [`StateGraph::compile`]
//! to obtain an immutable [`CompiledStateGraph`] that supports `invoke`.
//! Routing is fully edge-driven: after each node runs, the node's outgoing
//! edge (fixed or conditional) yields a [`Transition`], and the run ends only
//! when that transition is [`Transition::End`].

mod compile_error;
mod compiled;
mod node;
mod retry;
mod state_graph;
mod transition;
mod updater;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use node::Node;
pub use retry::RetryPolicy;
pub use state_graph::{StateGraph, DEFAULT_MAX_STEPS};
pub use transition::{EdgeRouterFn, Transition};
pub use updater::{BoxedStateUpdater, ReplaceUpdater, StateUpdater};
