//! Session log seam and the in-memory backend.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::{SessionEntry, SessionResult};

/// Append-only, time-ordered record storage.
///
/// Appends are fire-and-forget relative to gate decisions: nothing on the
/// tool-call decision path waits on this trait.
#[async_trait::async_trait]
pub trait SessionLog: Send + Sync {
    fn name(&self) -> &str;

    /// Append one record to the end of the log.
    async fn append(&self, entry: SessionEntry) -> SessionResult<()>;

    /// All records in append order.
    async fn entries(&self) -> SessionResult<Vec<SessionEntry>>;
}

/// In-memory log for tests and single-process embedders.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Arc<RwLock<Vec<SessionEntry>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Drop all records.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait::async_trait]
impl SessionLog for MemoryLog {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, entry: SessionEntry) -> SessionResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn entries(&self) -> SessionResult<Vec<SessionEntry>> {
        Ok(self.entries.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::AgentMode;

    #[tokio::test]
    async fn test_memory_log_append_and_read() {
        let log = MemoryLog::new();
        assert_eq!(log.count().await, 0);

        log.append(SessionEntry::mode_change(AgentMode::Ask))
            .await
            .unwrap();
        log.append(SessionEntry::mode_change(AgentMode::Build))
            .await
            .unwrap();

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            super::super::last_recorded_mode(&entries),
            Some(AgentMode::Build)
        );
    }

    #[tokio::test]
    async fn test_memory_log_clear() {
        let log = MemoryLog::new();
        log.append(SessionEntry::mode_change(AgentMode::Plan))
            .await
            .unwrap();
        log.clear().await;
        assert_eq!(log.count().await, 0);
    }
}
