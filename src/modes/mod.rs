//! Operating modes and the state machine that owns the active one.

mod machine;
mod mode;

pub use machine::ModeMachine;
pub use mode::AgentMode;
