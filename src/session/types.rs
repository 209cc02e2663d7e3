//! Session log record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modes::AgentMode;

/// One record in the append-only session log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(flatten)]
    pub kind: EntryKind,
    pub timestamp: DateTime<Utc>,
}

/// Typed payloads. The log file may also hold records owned by other
/// components; those fail to parse here and are skipped on read.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EntryKind {
    /// A mode transition. The mode is stored as a string and validated at
    /// restore time so an unrecognized value degrades to the default mode
    /// instead of failing the whole scan.
    AgentMode { mode: String },
}

impl SessionEntry {
    /// Record a mode transition, stamped now.
    pub fn mode_change(mode: AgentMode) -> Self {
        Self {
            kind: EntryKind::AgentMode {
                mode: mode.to_string(),
            },
            timestamp: Utc::now(),
        }
    }
}

/// The mode stored by the most recent mode record, if any.
///
/// An unrecognized stored value yields the default mode (`build`) rather
/// than an error; restoration has no failure path.
pub fn last_recorded_mode(entries: &[SessionEntry]) -> Option<AgentMode> {
    entries.iter().rev().find_map(|entry| {
        let EntryKind::AgentMode { mode } = &entry.kind;
        Some(mode.parse().unwrap_or_default())
    })
}
