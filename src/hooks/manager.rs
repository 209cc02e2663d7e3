//! Hook manager for registering and executing hooks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::time::{Duration, timeout};

use super::{Hook, HookContext, HookEvent, HookInput, HookOutput};

/// Executes registered hooks for an event in priority order.
///
/// A failing or timed-out hook is logged and skipped; only an explicit
/// block stops the chain. For blockable events the first block wins and
/// later hooks do not run.
#[derive(Clone, Default)]
pub struct HookManager {
    hooks: Vec<Arc<dyn Hook>>,
    by_event: HashMap<HookEvent, Vec<usize>>,
}

impl HookManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn rebuild_index(&mut self) {
        self.by_event.clear();
        for event in HookEvent::all() {
            let mut indices: Vec<usize> = self
                .hooks
                .iter()
                .enumerate()
                .filter(|(_, hook)| hook.events().contains(event))
                .map(|(i, _)| i)
                .collect();
            indices.sort_by_key(|&i| std::cmp::Reverse(self.hooks[i].priority()));
            self.by_event.insert(*event, indices);
        }
    }

    pub fn register<H: Hook + 'static>(&mut self, hook: H) {
        self.register_arc(Arc::new(hook));
    }

    pub fn register_arc(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
        self.rebuild_index();
    }

    pub fn unregister(&mut self, name: &str) {
        self.hooks.retain(|hook| hook.name() != name);
        self.rebuild_index();
    }

    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    pub fn has_hook(&self, name: &str) -> bool {
        self.hooks.iter().any(|hook| hook.name() == name)
    }

    fn hooks_for_event(&self, event: HookEvent) -> Vec<&Arc<dyn Hook>> {
        self.by_event
            .get(&event)
            .map(|indices| indices.iter().map(|&i| &self.hooks[i]).collect())
            .unwrap_or_default()
    }

    pub async fn execute(
        &self,
        event: HookEvent,
        input: HookInput,
        ctx: &HookContext,
    ) -> Result<HookOutput, crate::Error> {
        let mut merged = HookOutput::allow();

        for hook in self.hooks_for_event(event) {
            if let (Some(matcher), Some(tool_name)) =
                (hook.tool_matcher(), input.tool_name.as_deref())
            {
                if !matcher.is_match(tool_name) {
                    continue;
                }
            }

            let result = timeout(
                Duration::from_secs(hook.timeout_secs()),
                hook.execute(input.clone(), ctx),
            )
            .await;

            let output = match result {
                Ok(Ok(output)) => output,
                Ok(Err(error)) => {
                    tracing::warn!(hook = hook.name(), %error, "hook execution failed");
                    continue;
                }
                Err(_) => {
                    tracing::warn!(
                        hook = hook.name(),
                        timeout_secs = hook.timeout_secs(),
                        "hook timed out"
                    );
                    continue;
                }
            };

            merged = Self::merge(merged, output);
            if !merged.continue_execution {
                break;
            }
        }

        Ok(merged)
    }

    fn merge(base: HookOutput, next: HookOutput) -> HookOutput {
        HookOutput {
            continue_execution: base.continue_execution && next.continue_execution,
            stop_reason: base.stop_reason.or(next.stop_reason),
            injected_context: base.injected_context.or(next.injected_context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct BlockBash;

    #[async_trait]
    impl Hook for BlockBash {
        fn name(&self) -> &str {
            "block-bash"
        }

        fn events(&self) -> &[HookEvent] {
            &[HookEvent::PreToolUse]
        }

        async fn execute(
            &self,
            input: HookInput,
            _ctx: &HookContext,
        ) -> Result<HookOutput, crate::Error> {
            if input.tool_name.as_deref() == Some("bash") {
                Ok(HookOutput::block("no shell today"))
            } else {
                Ok(HookOutput::allow())
            }
        }
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut manager = HookManager::new();
        manager.register(BlockBash);
        assert!(manager.has_hook("block-bash"));

        let ctx = HookContext::new("s1");
        let input = HookInput::pre_tool_use("s1", "bash", serde_json::json!({}));
        let output = manager
            .execute(HookEvent::PreToolUse, input, &ctx)
            .await
            .unwrap();
        assert!(!output.continue_execution);
        assert_eq!(output.stop_reason.as_deref(), Some("no shell today"));
    }

    #[tokio::test]
    async fn test_no_hooks_allows() {
        let manager = HookManager::new();
        let ctx = HookContext::default();
        let output = manager
            .execute(HookEvent::TurnStart, HookInput::turn_start(""), &ctx)
            .await
            .unwrap();
        assert!(output.continue_execution);
    }

    #[tokio::test]
    async fn test_unregister() {
        let mut manager = HookManager::new();
        manager.register(BlockBash);
        manager.unregister("block-bash");
        assert!(!manager.has_hook("block-bash"));
    }
}
