//! Hook traits and types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::context::ContextMessage;

/// Lifecycle points at which hooks run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Before a tool is executed (can block)
    PreToolUse,

    /// At the start of every agent turn (can inject context)
    TurnStart,

    /// When a session begins
    SessionStart,

    /// When a session ends
    SessionEnd,
}

impl HookEvent {
    /// Whether hooks for this event can block execution.
    pub fn can_block(&self) -> bool {
        matches!(self, HookEvent::PreToolUse)
    }

    pub fn all() -> &'static [HookEvent] {
        &[
            HookEvent::PreToolUse,
            HookEvent::TurnStart,
            HookEvent::SessionStart,
            HookEvent::SessionEnd,
        ]
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookEvent::PreToolUse => write!(f, "pre_tool_use"),
            HookEvent::TurnStart => write!(f, "turn_start"),
            HookEvent::SessionStart => write!(f, "session_start"),
            HookEvent::SessionEnd => write!(f, "session_end"),
        }
    }
}

/// Input data for hook execution.
#[derive(Clone, Debug, Default)]
pub struct HookInput {
    pub event: Option<HookEvent>,

    /// Tool name (for [`HookEvent::PreToolUse`])
    pub tool_name: Option<String>,

    /// Tool input (for [`HookEvent::PreToolUse`])
    pub tool_input: Option<Value>,

    pub session_id: String,

    pub timestamp: DateTime<Utc>,
}

impl HookInput {
    pub fn pre_tool_use(
        session_id: impl Into<String>,
        tool_name: impl Into<String>,
        input: Value,
    ) -> Self {
        Self {
            event: Some(HookEvent::PreToolUse),
            tool_name: Some(tool_name.into()),
            tool_input: Some(input),
            session_id: session_id.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn turn_start(session_id: impl Into<String>) -> Self {
        Self {
            event: Some(HookEvent::TurnStart),
            session_id: session_id.into(),
            timestamp: Utc::now(),
            ..Default::default()
        }
    }

    pub fn session_start(session_id: impl Into<String>) -> Self {
        Self {
            event: Some(HookEvent::SessionStart),
            session_id: session_id.into(),
            timestamp: Utc::now(),
            ..Default::default()
        }
    }

    pub fn session_end(session_id: impl Into<String>) -> Self {
        Self {
            event: Some(HookEvent::SessionEnd),
            session_id: session_id.into(),
            timestamp: Utc::now(),
            ..Default::default()
        }
    }
}

/// Output from hook execution.
#[derive(Clone, Debug, Default)]
pub struct HookOutput {
    /// Whether to continue execution (false = block)
    pub continue_execution: bool,

    /// Reason for blocking (if `continue_execution` is false)
    pub stop_reason: Option<String>,

    /// Context message to inject into the coming turn
    pub injected_context: Option<ContextMessage>,
}

impl HookOutput {
    pub fn allow() -> Self {
        Self {
            continue_execution: true,
            ..Default::default()
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            continue_execution: false,
            stop_reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, message: ContextMessage) -> Self {
        self.injected_context = Some(message);
        self
    }
}

/// Context provided to hook execution.
#[derive(Clone, Debug)]
pub struct HookContext {
    pub session_id: String,

    /// Cancellation token for the surrounding operation. Gate evaluation
    /// itself is bounded and never observes it.
    pub cancellation_token: CancellationToken,
}

impl Default for HookContext {
    fn default() -> Self {
        Self {
            session_id: String::new(),
            cancellation_token: CancellationToken::new(),
        }
    }
}

impl HookContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }
}

/// Trait for implementing hooks.
///
/// Hooks run at specific lifecycle points and can block tool executions or
/// inject context. The mode engine itself is the principal implementor;
/// hosts can register additional policy hooks beside it.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Unique name of this hook.
    fn name(&self) -> &str;

    /// Events this hook handles.
    fn events(&self) -> &[HookEvent];

    /// Tool name matcher; `None` applies to all tools.
    fn tool_matcher(&self) -> Option<&Regex> {
        None
    }

    /// Timeout for this hook in seconds.
    fn timeout_secs(&self) -> u64 {
        60
    }

    /// Priority (higher runs first).
    fn priority(&self) -> i32 {
        0
    }

    async fn execute(&self, input: HookInput, ctx: &HookContext)
    -> Result<HookOutput, crate::Error>;
}
