//! Shared workflow state and the merge function that combines node deltas.
//!
//! Nodes never write to a shared store. Each node returns a delta-shaped
//! `AgentState` (new messages plus an optional sender claim); `merge_state`
//! folds the delta into the accumulated state. Messages are append-only:
//! nothing a node returns can remove or edit prior history.

use std::fmt::Debug;

use crate::graph::StateUpdater;
use crate::message::Message;

/// Conversation state shared by all nodes in a workflow graph.
///
/// `sender` names the agent that produced the most recent agent turn. The
/// tool execution node leaves it untouched (returns `None` in its delta) so
/// control can return to whichever agent requested the tool.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AgentState {
    /// Full conversation so far; grows monotonically.
    pub messages: Vec<Message>,
    /// Name of the last agent to take a turn, when one has.
    pub sender: Option<String>,
}

impl AgentState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the initial state for a run: one human message, no sender.
    pub fn from_user_message(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::human(content)],
            sender: None,
        }
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Folds a node's delta into the accumulated state.
///
/// Messages are appended; they are never replaced or reordered. The sender
/// is overwritten only when the delta claims one, so a node that returns
/// `sender: None` (the tool node) preserves the previous agent's claim.
pub fn merge_state(current: &mut AgentState, delta: &AgentState) {
    current.messages.extend(delta.messages.iter().cloned());
    if delta.sender.is_some() {
        current.sender = delta.sender.clone();
    }
}

/// `StateUpdater` that applies [`merge_state`]; the workflow graphs in this
/// crate are compiled with this updater rather than whole-state replacement.
#[derive(Debug, Clone, Default)]
pub struct MergeUpdater;

impl StateUpdater<AgentState> for MergeUpdater {
    fn apply_update(&self, current: &mut AgentState, update: &AgentState) {
        merge_state(current, update);
    }
}
