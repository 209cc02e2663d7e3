//! Append-only session log.
//!
//! The policy engine consumes a time-ordered sequence of typed records: it
//! appends one record per mode transition and scans back at session start
//! to restore the prior mode. Storage itself is a narrow seam
//! ([`SessionLog`]) with a JSONL file backend and an in-memory backend for
//! tests and embedders that persist elsewhere.

mod jsonl;
mod log;
mod types;

pub use jsonl::{JsonlConfig, JsonlConfigBuilder, JsonlLog};
pub use log::{MemoryLog, SessionLog};
pub use types::{EntryKind, SessionEntry, last_recorded_mode};

/// Session log errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
