//! Mode engine: the integration point the host installs.
//!
//! Wires the mode machine, tool registry, session log, gate, and context
//! injection together, and exposes the whole bundle as a [`Hook`] so it
//! drops into a [`crate::HookManager`] beside any host-defined hooks.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::context::{self, ContextMessage, TaggedMessage};
use crate::gate::{self, GateDecision};
use crate::hooks::{Hook, HookContext, HookEvent, HookInput, HookOutput};
use crate::modes::{AgentMode, ModeMachine};
use crate::session::SessionLog;
use crate::tools::ToolRegistry;

/// Owns mode state and keeps the registry's active tool set in sync.
///
/// The host maps its user-facing controls (three direct-set commands and a
/// cycle shortcut, names and keys being presentation detail) onto
/// [`set_mode`](Self::set_mode) and [`cycle`](Self::cycle).
pub struct ModeEngine {
    machine: ModeMachine,
    registry: Arc<RwLock<ToolRegistry>>,
}

impl ModeEngine {
    pub fn new(registry: Arc<RwLock<ToolRegistry>>, log: Arc<dyn SessionLog>) -> Self {
        Self {
            machine: ModeMachine::new(log),
            registry,
        }
    }

    pub fn machine(&self) -> &ModeMachine {
        &self.machine
    }

    /// The active mode.
    pub fn mode(&self) -> AgentMode {
        self.machine.current()
    }

    /// Recompute and apply the active tool set for the current mode.
    pub async fn apply_mode(&self) {
        let mode = self.machine.current();
        let mut registry = self.registry.write().await;
        let all: Vec<String> = registry.names().iter().map(|s| s.to_string()).collect();
        let allowed = mode.allowed_tools(&all);
        tracing::info!(mode = %mode, active = allowed.len(), total = all.len(), "applied tool set");
        registry.set_active(allowed);
    }

    /// Advance ask -> plan -> build -> ask and apply the result.
    pub async fn cycle(&self) -> AgentMode {
        let mode = self.machine.cycle().await;
        self.apply_mode().await;
        mode
    }

    /// Set the mode directly and apply it.
    pub async fn set_mode(&self, mode: AgentMode) -> AgentMode {
        let mode = self.machine.set_mode(mode).await;
        self.apply_mode().await;
        mode
    }

    /// Session start: adopt the most recent persisted mode, then apply.
    pub async fn start_session(&self) -> AgentMode {
        let mode = self.machine.restore().await;
        self.apply_mode().await;
        mode
    }

    /// Session end: append a closing record of the active mode.
    pub async fn end_session(&self) -> AgentMode {
        self.machine.checkpoint().await
    }

    /// Gate one tool invocation against the current mode.
    ///
    /// Synchronous and I/O-free; never waits on the session log.
    pub fn check_tool_call(&self, tool_name: &str, input: &Value) -> GateDecision {
        gate::evaluate(self.machine.current(), tool_name, input)
    }

    /// Context message for the coming turn; `None` in build mode.
    pub fn turn_context(&self) -> Option<ContextMessage> {
        context::mode_context(self.machine.current())
    }

    /// Sweep stale mode-context messages before a new turn.
    pub fn filter_context<M: TaggedMessage>(&self, messages: Vec<M>) -> Vec<M> {
        context::strip_mode_context(messages)
    }
}

#[async_trait]
impl Hook for ModeEngine {
    fn name(&self) -> &str {
        "agent-mode"
    }

    fn events(&self) -> &[HookEvent] {
        &[
            HookEvent::PreToolUse,
            HookEvent::TurnStart,
            HookEvent::SessionStart,
            HookEvent::SessionEnd,
        ]
    }

    async fn execute(
        &self,
        input: HookInput,
        _ctx: &HookContext,
    ) -> Result<HookOutput, crate::Error> {
        match input.event {
            Some(HookEvent::PreToolUse) => {
                let tool_name = input.tool_name.as_deref().unwrap_or_default();
                let tool_input = input.tool_input.unwrap_or(Value::Null);
                match self.check_tool_call(tool_name, &tool_input) {
                    GateDecision::Allow => Ok(HookOutput::allow()),
                    GateDecision::Block { reason } => Ok(HookOutput::block(reason)),
                }
            }
            Some(HookEvent::TurnStart) => {
                let mut output = HookOutput::allow();
                if let Some(message) = self.turn_context() {
                    output = output.with_context(message);
                }
                Ok(output)
            }
            Some(HookEvent::SessionStart) => {
                self.start_session().await;
                Ok(HookOutput::allow())
            }
            Some(HookEvent::SessionEnd) => {
                self.end_session().await;
                Ok(HookOutput::allow())
            }
            None => Ok(HookOutput::allow()),
        }
    }
}
