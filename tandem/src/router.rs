//! Pure routing decision over the shared state.
//!
//! Inspects only the most recent message; no I/O, no mutation. The relay
//! graph's conditional edges translate the decision into a [`Transition`]
//! (crate::graph::Transition).

use crate::state::AgentState;

/// Marker an agent puts at the front of its reply to end the run.
pub const FINAL_ANSWER_MARKER: &str = "FINAL ANSWER";

/// What the workflow should do after an agent's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The last message carries a pending tool call; execute it.
    CallTool,
    /// The last message declares a final answer; terminate.
    End,
    /// Neither; hand the turn to the counterpart agent.
    Continue,
}

/// Decides the next move by inspecting the last message.
///
/// Priority is fixed: a pending tool call wins over a final-answer marker,
/// which wins over continuation. An agent that both requests a tool and
/// writes "FINAL ANSWER" gets its tool executed first; the marker routes
/// the run to its end on a later turn. An empty message list continues.
pub fn route(state: &AgentState) -> RouteDecision {
    let Some(last) = state.last_message() else {
        return RouteDecision::Continue;
    };
    if last.tool_call.is_some() {
        return RouteDecision::CallTool;
    }
    if last.content.contains(FINAL_ANSWER_MARKER) {
        return RouteDecision::End;
    }
    RouteDecision::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, ToolCallRequest};

    fn state_with(msg: Message) -> AgentState {
        AgentState {
            messages: vec![msg],
            sender: None,
        }
    }

    /// **Scenario**: A pending tool call routes to CallTool.
    #[test]
    fn route_tool_call_wins() {
        let msg = Message::assistant("searching").with_tool_call(ToolCallRequest {
            name: "tavily_search".into(),
            arguments: "{}".into(),
        });
        assert_eq!(route(&state_with(msg)), RouteDecision::CallTool);
    }

    /// **Scenario**: "FINAL ANSWER" anywhere in the content routes to End.
    #[test]
    fn route_final_answer_ends() {
        let msg = Message::assistant("FINAL ANSWER: the chart is above.");
        assert_eq!(route(&state_with(msg)), RouteDecision::End);
        let msg = Message::assistant("Here it is.\nFINAL ANSWER");
        assert_eq!(route(&state_with(msg)), RouteDecision::End);
    }

    /// **Scenario**: A message with both a tool call and the marker routes to
    /// CallTool; the tool call has priority.
    #[test]
    fn route_tool_call_beats_final_answer() {
        let msg = Message::assistant("FINAL ANSWER soon").with_tool_call(ToolCallRequest {
            name: "python_repl".into(),
            arguments: "{}".into(),
        });
        assert_eq!(route(&state_with(msg)), RouteDecision::CallTool);
    }

    /// **Scenario**: Plain assistant text routes to Continue.
    #[test]
    fn route_plain_text_continues() {
        let msg = Message::assistant("I found three sources so far.");
        assert_eq!(route(&state_with(msg)), RouteDecision::Continue);
    }

    /// **Scenario**: An empty message list routes to Continue, never panics.
    #[test]
    fn route_empty_messages_continues() {
        let state = AgentState::new();
        assert_eq!(route(&state), RouteDecision::Continue);
    }

    /// **Scenario**: The marker is case sensitive; "final answer" does not end the run.
    #[test]
    fn route_marker_is_case_sensitive() {
        let msg = Message::assistant("this is my final answer");
        assert_eq!(route(&state_with(msg)), RouteDecision::Continue);
    }
}
