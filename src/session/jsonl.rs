//! JSONL file backend for the session log.
//!
//! One file per session, one JSON record per line, append-only. Records
//! written by other components sharing the file are skipped on read rather
//! than treated as corruption.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use tokio::sync::Mutex;
use uuid::Uuid;

use super::{SessionEntry, SessionLog, SessionResult};

/// Configuration for the JSONL backend.
#[derive(Clone, Debug)]
pub struct JsonlConfig {
    /// Base directory for log files (default: `~/.agent-mode`).
    pub base_dir: PathBuf,
    /// Session identifier; names the log file.
    pub session_id: Uuid,
}

impl Default for JsonlConfig {
    fn default() -> Self {
        let home = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            base_dir: home.join(".agent-mode"),
            session_id: Uuid::new_v4(),
        }
    }
}

impl JsonlConfig {
    pub fn builder() -> JsonlConfigBuilder {
        JsonlConfigBuilder::default()
    }

    fn path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.jsonl", self.session_id))
    }
}

/// Builder for [`JsonlConfig`].
#[derive(Default)]
pub struct JsonlConfigBuilder {
    base_dir: Option<PathBuf>,
    session_id: Option<Uuid>,
}

impl JsonlConfigBuilder {
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    pub fn session_id(mut self, id: Uuid) -> Self {
        self.session_id = Some(id);
        self
    }

    pub fn build(self) -> JsonlConfig {
        let default = JsonlConfig::default();
        JsonlConfig {
            base_dir: self.base_dir.unwrap_or(default.base_dir),
            session_id: self.session_id.unwrap_or(default.session_id),
        }
    }
}

/// File-backed session log.
pub struct JsonlLog {
    config: JsonlConfig,
    // Serializes appends so interleaved writers cannot tear a line.
    write_lock: Mutex<()>,
}

impl JsonlLog {
    pub fn new(config: JsonlConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// The log file path for this session.
    pub fn path(&self) -> PathBuf {
        self.config.path()
    }
}

#[async_trait::async_trait]
impl SessionLog for JsonlLog {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn append(&self, entry: SessionEntry) -> SessionResult<()> {
        let line = serde_json::to_string(&entry)?;
        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(&self.config.base_dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.config.path())?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    async fn entries(&self) -> SessionResult<Vec<SessionEntry>> {
        let path = self.config.path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let _guard = self.write_lock.lock().await;
        let reader = BufReader::new(fs::File::open(&path)?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SessionEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    // Foreign or malformed record; not ours to interpret.
                    tracing::debug!(%error, "skipping unparseable session log line");
                }
            }
        }
        Ok(entries)
    }
}
