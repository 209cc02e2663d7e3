//! Mode state machine.

use std::sync::{Arc, Mutex, PoisonError};

use super::AgentMode;
use crate::session::{SessionEntry, SessionLog, last_recorded_mode};

/// Owns the single process-wide mode value and its transitions.
///
/// Every read and transition goes through one mutex, so a concurrent gate
/// evaluation never observes a half-replaced mode. Transitions are total:
/// [`cycle`](Self::cycle) and [`set_mode`](Self::set_mode) always succeed.
/// Each transition appends an `agent-mode` record to the session log;
/// append failures are logged and swallowed so persistence can never veto
/// a mode change.
pub struct ModeMachine {
    current: Mutex<AgentMode>,
    log: Arc<dyn SessionLog>,
}

impl ModeMachine {
    /// Create a machine in the default mode (`build`).
    pub fn new(log: Arc<dyn SessionLog>) -> Self {
        Self {
            current: Mutex::new(AgentMode::default()),
            log,
        }
    }

    /// The active mode.
    pub fn current(&self) -> AgentMode {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance to the next mode in the fixed cycle and return it.
    pub async fn cycle(&self) -> AgentMode {
        let next = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = current.next();
            *current
        };
        self.record(next).await;
        next
    }

    /// Set the mode directly and return it.
    pub async fn set_mode(&self, target: AgentMode) -> AgentMode {
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = target;
        }
        self.record(target).await;
        target
    }

    /// Compute the allowed tool set for the active mode.
    pub fn active_tools<S: AsRef<str>>(&self, all: &[S]) -> Vec<String> {
        self.current().allowed_tools(all)
    }

    /// Adopt the most recent persisted mode, if any.
    ///
    /// Called once at session start. A missing record leaves the default in
    /// place; a record whose stored value is not one of the three modes
    /// falls back to `build`. No record is appended for restoration, only
    /// for transitions.
    pub async fn restore(&self) -> AgentMode {
        match self.log.entries().await {
            Ok(entries) => {
                if let Some(mode) = last_recorded_mode(&entries) {
                    let mut current =
                        self.current.lock().unwrap_or_else(PoisonError::into_inner);
                    *current = mode;
                    tracing::info!(mode = %mode, "restored agent mode from session log");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to read session log; keeping default mode");
            }
        }
        self.current()
    }

    /// Append a closing record of the active mode.
    ///
    /// Called at session end so the latest mode is on disk even when an
    /// earlier transition append failed.
    pub async fn checkpoint(&self) -> AgentMode {
        let mode = self.current();
        if let Err(error) = self.log.append(SessionEntry::mode_change(mode)).await {
            tracing::warn!(%error, "failed to append session-end mode record");
        }
        mode
    }

    async fn record(&self, mode: AgentMode) {
        tracing::info!(mode = %mode, "agent mode changed");
        if let Err(error) = self.log.append(SessionEntry::mode_change(mode)).await {
            tracing::warn!(%error, "failed to persist mode change");
        }
    }
}
