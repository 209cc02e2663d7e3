//! Mode context injection and stale-context filtering.
//!
//! While the agent is not in build mode, one instruction message
//! describing the active mode's constraints is injected at the start of
//! each turn. The message carries a marker type so the previous turn's
//! copy can be swept out before the new one lands: tag-and-sweep over the
//! message list, no mutable context editing.

use serde::{Deserialize, Serialize};

use crate::modes::AgentMode;

/// Marker carried by injected mode-context messages.
pub const MODE_CONTEXT_TYPE: &str = "agent-mode-context";

/// An instruction message destined for the agent's reasoning input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    /// Discriminant used by the pre-turn sweep.
    pub custom_type: String,
    pub content: String,
    /// Whether the host should render the message to the user.
    pub display: bool,
}

impl ContextMessage {
    fn mode_context(content: impl Into<String>) -> Self {
        Self {
            custom_type: MODE_CONTEXT_TYPE.to_string(),
            content: content.into(),
            display: false,
        }
    }
}

/// Messages that may carry a marker type. Implemented by the host's
/// conversation message type so the sweep needs no knowledge of its shape.
pub trait TaggedMessage {
    fn custom_type(&self) -> Option<&str>;
}

impl TaggedMessage for ContextMessage {
    fn custom_type(&self) -> Option<&str> {
        Some(&self.custom_type)
    }
}

/// The instruction payload for `mode`, or `None` in build mode.
pub fn mode_context(mode: AgentMode) -> Option<ContextMessage> {
    instructions(mode).map(ContextMessage::mode_context)
}

/// Remove mode-context messages left over from prior turns.
pub fn strip_mode_context<M: TaggedMessage>(messages: Vec<M>) -> Vec<M> {
    messages
        .into_iter()
        .filter(|message| message.custom_type() != Some(MODE_CONTEXT_TYPE))
        .collect()
}

fn instructions(mode: AgentMode) -> Option<&'static str> {
    match mode {
        AgentMode::Ask => Some(ASK_INSTRUCTIONS),
        AgentMode::Plan => Some(PLAN_INSTRUCTIONS),
        AgentMode::Build => None,
    }
}

const ASK_INSTRUCTIONS: &str = "\
[MODE: ask. Observe and advise.]
You are in ask mode. Your role is to help the user understand, investigate, \
and reason about the codebase, not to change it. Read files, explore \
structure, run queries, trace data flows, and explain what you find. When \
the user asks for a fix or feature, describe what you would do and where, \
but do not make the changes. If your analysis naturally leads to the fix, \
present it as a recommendation (\"I would change X in Y\") rather than \
reaching for edit/write.

The edit and write tools are disabled. Bash commands that modify files, git \
state, packages, or processes will be blocked. Reading, searching, and \
running inline expressions are all fine. When the user is ready to act on \
your recommendations, they can switch to build mode.";

const PLAN_INSTRUCTIONS: &str = "\
[MODE: plan. Design and document.]
You are in plan mode. Your role is to help the user think through problems \
and capture decisions in markdown documents. Read anything, write .md/.mdx \
files, and focus on producing clear plans, designs, and specifications \
rather than code. When implementation details come up, document them as \
actionable steps in the plan rather than writing the code directly.

Only .md/.mdx files can be created or edited. Bash commands that modify \
files, git state, packages, or processes will be blocked. When the plan is \
ready for implementation, switch to build mode.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mode_injects_nothing() {
        assert!(mode_context(AgentMode::Build).is_none());
    }

    #[test]
    fn test_restricted_modes_inject_tagged_message() {
        for mode in [AgentMode::Ask, AgentMode::Plan] {
            let message = mode_context(mode).unwrap();
            assert_eq!(message.custom_type, MODE_CONTEXT_TYPE);
            assert!(!message.display);
            assert!(message.content.contains(mode.label()));
        }
    }

    #[test]
    fn test_sweep_removes_only_tagged_messages() {
        let other = ContextMessage {
            custom_type: "todo-list".to_string(),
            content: "keep me".to_string(),
            display: true,
        };
        let messages = vec![
            mode_context(AgentMode::Ask).unwrap(),
            other.clone(),
            mode_context(AgentMode::Plan).unwrap(),
        ];

        let remaining = strip_mode_context(messages);
        assert_eq!(remaining, vec![other]);
    }

    #[test]
    fn test_inject_then_sweep_does_not_accumulate() {
        let mut messages = Vec::new();
        for _ in 0..3 {
            messages = strip_mode_context(messages);
            messages.push(mode_context(AgentMode::Ask).unwrap());
        }
        assert_eq!(messages.len(), 1);
    }
}
