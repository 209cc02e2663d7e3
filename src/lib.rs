//! # agent-mode
//!
//! Runtime policy engine that restricts an autonomous coding agent's tool
//! access according to a user-selected operating mode, and decides whether
//! an arbitrary shell command string is safe to run under a restricted mode.
//!
//! Three modes control tool access:
//!
//! - **ask**: read-only, no file modifications (chat and exploration)
//! - **plan**: read plus markdown-only editing (writing plans)
//! - **build**: full tool access (implementation)
//!
//! The bash classifier checks every command in a chain (`&&`, `||`, `;`,
//! `|`) against a catalog of known mutating commands while allowing
//! routine read-only work. It is a best-effort lexical check over
//! cooperating command strings, not a sandbox.
//!
//! ## Quick Start
//!
//! ```rust
//! use agent_mode::{AgentMode, Verdict, check_command};
//!
//! assert_eq!(check_command("git log --oneline"), Verdict::Allowed);
//! assert!(check_command("ls && rm -rf /tmp/x").is_blocked());
//! assert_eq!(AgentMode::Ask.deny_list(), ["edit", "write"]);
//! ```
//!
//! ## Full Engine Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agent_mode::{JsonlConfig, JsonlLog, ModeEngine, ToolInfo, ToolRegistry};
//! use tokio::sync::RwLock;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut registry = ToolRegistry::new();
//!     registry.register(ToolInfo::new("bash", "run shell commands"));
//!
//!     let registry = Arc::new(RwLock::new(registry));
//!     let log = Arc::new(JsonlLog::new(JsonlConfig::default()));
//!     let engine = ModeEngine::new(registry, log);
//!
//!     engine.start_session().await;
//!     let decision = engine.check_tool_call(
//!         "bash",
//!         &serde_json::json!({"command": "cargo tree"}),
//!     );
//!     assert!(!decision.is_blocked());
//! }
//! ```

pub mod classifier;
pub mod context;
pub mod engine;
pub mod gate;
pub mod hooks;
pub mod modes;
pub mod session;
pub mod tools;

pub use classifier::{
    CommandParts, Verdict, check_command, check_segment, extract_command, split_commands,
};
pub use context::{
    ContextMessage, MODE_CONTEXT_TYPE, TaggedMessage, mode_context, strip_mode_context,
};
pub use engine::ModeEngine;
pub use gate::{GateDecision, is_markdown_path};
pub use hooks::{Hook, HookContext, HookEvent, HookInput, HookManager, HookOutput};
pub use modes::{AgentMode, ModeMachine};
pub use session::{
    EntryKind, JsonlConfig, JsonlLog, MemoryLog, SessionEntry, SessionError, SessionLog,
    SessionResult, last_recorded_mode,
};
pub use tools::{ToolInfo, ToolRegistry};

/// Error type for policy-engine operations.
///
/// Classification and gating are total functions and never error; the
/// failure surface is the session log and hook plumbing around them.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Session log operation failed.
    #[error("Session log error: {0}")]
    Session(String),
}

impl From<session::SessionError> for Error {
    fn from(err: session::SessionError) -> Self {
        match err {
            session::SessionError::Io(e) => Error::Io(e),
            session::SessionError::Serialization(e) => Error::Json(e),
            session::SessionError::Storage { message } => Error::Session(message),
        }
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Session("log unavailable".to_string());
        assert!(err.to_string().contains("log unavailable"));
    }

    #[test]
    fn test_session_error_conversion() {
        let err: Error = session::SessionError::Storage {
            message: "disk full".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Session(_)));
    }
}
