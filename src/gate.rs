//! Tool-call gate: mode × tool invocation → allow or block.

use serde_json::Value;

use crate::classifier::{Verdict, check_command};
use crate::modes::AgentMode;

/// Decision returned by the gate for one tool invocation.
///
/// A block is not an error: it carries a human-readable reason, names the
/// remedy (switch mode), and the underlying tool simply does not run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Block { reason: String },
}

impl GateDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, GateDecision::Block { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            GateDecision::Allow => None,
            GateDecision::Block { reason } => Some(reason),
        }
    }

    fn block(reason: impl Into<String>) -> Self {
        GateDecision::Block {
            reason: reason.into(),
        }
    }
}

/// Evaluate one tool invocation against the active mode.
///
/// Pure and synchronous: it reads nothing but its arguments and performs
/// no I/O, so concurrent evaluations never contend. The caller reads the
/// mode from its single owner ([`crate::ModeMachine`]) before calling.
pub fn evaluate(mode: AgentMode, tool_name: &str, input: &Value) -> GateDecision {
    let decision = match mode {
        AgentMode::Build => GateDecision::Allow,
        AgentMode::Ask => evaluate_ask(tool_name, input),
        AgentMode::Plan => evaluate_plan(tool_name, input),
    };
    if let GateDecision::Block { reason } = &decision {
        tracing::debug!(mode = %mode, tool = tool_name, %reason, "tool call blocked");
    }
    decision
}

fn evaluate_ask(tool_name: &str, input: &Value) -> GateDecision {
    match tool_name {
        "edit" | "write" => GateDecision::block(
            "ask mode: file modifications are disabled. Switch to build mode to enable them.",
        ),
        "bash" => classify_bash(AgentMode::Ask, input),
        _ => GateDecision::Allow,
    }
}

fn evaluate_plan(tool_name: &str, input: &Value) -> GateDecision {
    match tool_name {
        "edit" | "write" => {
            let path = input.get("path").and_then(Value::as_str).unwrap_or_default();
            if is_markdown_path(path) {
                GateDecision::Allow
            } else {
                GateDecision::block(
                    "plan mode: only .md/.mdx files can be created or edited. \
                     Switch to build mode for full access.",
                )
            }
        }
        "bash" => classify_bash(AgentMode::Plan, input),
        _ => GateDecision::Allow,
    }
}

fn classify_bash(mode: AgentMode, input: &Value) -> GateDecision {
    let command = input
        .get("command")
        .and_then(Value::as_str)
        .unwrap_or_default();
    match check_command(command) {
        Verdict::Allowed => GateDecision::Allow,
        Verdict::Blocked(reason) => GateDecision::block(format!(
            "{} mode blocked: {}. Switch to build mode to run it.",
            mode.label(),
            reason
        )),
    }
}

/// True when `path` points at a markdown document.
///
/// A leading `@` file-reference marker (owned by the host's prompt syntax)
/// is stripped before the extension check; matching is case-insensitive.
pub fn is_markdown_path(path: &str) -> bool {
    let path = path.strip_prefix('@').unwrap_or(path).trim();
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".md") || lower.ends_with(".mdx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_mode_allows_everything() {
        let input = json!({"command": "rm -rf /tmp/x"});
        assert_eq!(
            evaluate(AgentMode::Build, "bash", &input),
            GateDecision::Allow
        );
        assert_eq!(
            evaluate(AgentMode::Build, "write", &json!({"path": "main.rs"})),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_ask_mode_blocks_edit_and_write_unconditionally() {
        for tool in ["edit", "write"] {
            let decision = evaluate(AgentMode::Ask, tool, &json!({"path": "notes.md"}));
            assert!(decision.is_blocked());
            assert!(decision.reason().unwrap().contains("build"));
        }
    }

    #[test]
    fn test_ask_mode_classifies_bash() {
        let blocked = evaluate(AgentMode::Ask, "bash", &json!({"command": "rm -rf x"}));
        assert!(blocked.reason().unwrap().starts_with("ask mode blocked:"));

        let allowed = evaluate(AgentMode::Ask, "bash", &json!({"command": "git status"}));
        assert_eq!(allowed, GateDecision::Allow);
    }

    #[test]
    fn test_plan_mode_markdown_only() {
        let md = json!({"path": "notes.md"});
        let mdx = json!({"path": "docs/Page.MDX"});
        let txt = json!({"path": "notes.txt"});

        assert_eq!(evaluate(AgentMode::Plan, "write", &md), GateDecision::Allow);
        assert_eq!(evaluate(AgentMode::Plan, "edit", &mdx), GateDecision::Allow);

        let decision = evaluate(AgentMode::Plan, "write", &txt);
        assert!(decision.is_blocked());
        assert!(decision.reason().unwrap().contains(".md/.mdx"));
    }

    #[test]
    fn test_plan_mode_bash_matches_ask_policy() {
        let input = json!({"command": "echo hi > out.txt"});
        assert!(evaluate(AgentMode::Plan, "bash", &input).is_blocked());
        assert!(evaluate(AgentMode::Ask, "bash", &input).is_blocked());
    }

    #[test]
    fn test_unrelated_tools_pass_in_restricted_modes() {
        for mode in [AgentMode::Ask, AgentMode::Plan] {
            assert_eq!(
                evaluate(mode, "read", &json!({"path": "src/lib.rs"})),
                GateDecision::Allow
            );
            assert_eq!(
                evaluate(mode, "subagent", &json!({"task": "summarize"})),
                GateDecision::Allow
            );
        }
    }

    #[test]
    fn test_missing_input_fields_do_not_panic() {
        assert!(evaluate(AgentMode::Plan, "write", &json!({})).is_blocked());
        assert_eq!(
            evaluate(AgentMode::Ask, "bash", &json!({})),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_markdown_path_marker_and_case() {
        assert!(is_markdown_path("notes.md"));
        assert!(is_markdown_path("@docs/plan.mdx"));
        assert!(is_markdown_path("README.MD"));
        assert!(!is_markdown_path("notes.txt"));
        assert!(!is_markdown_path("md"));
        assert!(!is_markdown_path(""));
    }
}
