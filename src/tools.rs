//! Tool registry consumed by the policy engine.
//!
//! The engine does not define or execute tools. It reads the set of
//! registered names to compute the active tool set for a mode, and
//! instructs the registry which subset is currently active; execution and
//! registration belong to the host.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Name and description of a registered tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

impl ToolInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Registry of tool names with an active subset.
///
/// Newly registered tools start active; re-registering a name replaces the
/// earlier entry. `set_active` ignores names the registry does not know,
/// so a stale active list can never invent tools.
#[derive(Clone, Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolInfo>,
    active: HashSet<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: ToolInfo) {
        self.active.insert(tool.name.clone());
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name == tool.name) {
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name == name)
    }

    /// Replace the active subset. Unknown names are dropped.
    pub fn set_active<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active = names
            .into_iter()
            .map(Into::into)
            .filter(|name| self.contains(name))
            .collect();
    }

    /// Active tool names, in registration order.
    pub fn active_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|tool| tool.name.as_str())
            .filter(|name| self.active.contains(*name))
            .collect()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
