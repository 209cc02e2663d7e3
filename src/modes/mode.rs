//! Operating modes for agent tool access.

use serde::{Deserialize, Serialize};

/// Operating mode that determines which tools the agent may invoke.
///
/// # Modes
///
/// - **Ask**: read-only. File modifications are disabled and bash commands
///   that mutate files, git state, packages, or processes are blocked.
///   For exploring and reasoning about a codebase without changing it.
///
/// - **Plan**: read plus markdown editing. Only `.md`/`.mdx` files can be
///   created or edited; bash is restricted as in ask mode. For capturing
///   designs and plans before implementation.
///
/// - **Build**: full tool access. The default.
///
/// # Example
///
/// ```rust
/// use agent_mode::AgentMode;
///
/// let mode = AgentMode::default();
/// assert_eq!(mode, AgentMode::Build);
/// assert_eq!(AgentMode::Ask.next(), AgentMode::Plan);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Read-only: observe and advise
    Ask,

    /// Read + markdown editing: design and document
    Plan,

    /// Full tool access
    #[default]
    Build,
}

impl AgentMode {
    /// All modes in cycle order.
    pub const ALL: [AgentMode; 3] = [AgentMode::Ask, AgentMode::Plan, AgentMode::Build];

    /// The next mode in the fixed cycle `ask -> plan -> build -> ask`.
    pub fn next(&self) -> AgentMode {
        match self {
            AgentMode::Ask => AgentMode::Plan,
            AgentMode::Plan => AgentMode::Build,
            AgentMode::Build => AgentMode::Ask,
        }
    }

    /// Tool names removed from the active set while this mode is active.
    ///
    /// A deny list, not an allow list: tools registered by unrelated
    /// extensions stay usable in every mode unless named here. Plan mode
    /// denies nothing at the tool level; its markdown-only restriction is
    /// enforced per call by the gate.
    pub fn deny_list(&self) -> &'static [&'static str] {
        match self {
            AgentMode::Ask => &["edit", "write"],
            AgentMode::Plan => &[],
            AgentMode::Build => &[],
        }
    }

    /// Compute the allowed tool set: `all` minus this mode's deny list.
    pub fn allowed_tools<S: AsRef<str>>(&self, all: &[S]) -> Vec<String> {
        let deny = self.deny_list();
        all.iter()
            .map(|name| name.as_ref())
            .filter(|name| !deny.contains(name))
            .map(String::from)
            .collect()
    }

    /// True for the mode that applies no restrictions.
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, AgentMode::Build)
    }

    /// Short label used in notifications and block reasons.
    pub fn label(&self) -> &'static str {
        match self {
            AgentMode::Ask => "ask",
            AgentMode::Plan => "plan",
            AgentMode::Build => "build",
        }
    }
}

impl std::fmt::Display for AgentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AgentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ask" => Ok(AgentMode::Ask),
            "plan" => Ok(AgentMode::Plan),
            "build" => Ok(AgentMode::Build),
            _ => Err(format!("Unknown agent mode: {}", s)),
        }
    }
}
