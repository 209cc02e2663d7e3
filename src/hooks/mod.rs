//! Hook system for intercepting agent execution.

mod manager;
mod traits;

pub use manager::HookManager;
pub use traits::{Hook, HookContext, HookEvent, HookInput, HookOutput};
