//! Activity log: one JSON line per console action.
//!
//! Entries land in `~/.kvconsole/activity.jsonl`. Writing is best-effort; a
//! failed append never surfaces in the UI.
use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    /// The service or the network failed.
    Error,
    /// Local validation stopped the action before any request.
    Rejected,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub outcome: Outcome,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl ActivityEntry {
    pub fn new(action: &str, outcome: Outcome, message: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            env: None,
            key: None,
            outcome,
            message: message.to_string(),
            latency_ms: None,
        }
    }

    pub fn with_env(mut self, env: &str) -> Self {
        if !env.is_empty() {
            self.env = Some(env.to_string());
        }
        self
    }

    pub fn with_key(mut self, key: &str) -> Self {
        if !key.is_empty() {
            self.key = Some(key.to_string());
        }
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Append-only JSONL log. A log without a path discards everything.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    /// Log at the default location, or a disabled log when `enabled` is false
    /// or the home directory is unknown.
    pub fn open_default(enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }
        Self {
            path: default_log_path(),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, entry: &ActivityEntry) {
        let _ = self.append(entry);
    }

    fn append(&self, entry: &ActivityEntry) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{json}")?;

        Ok(())
    }

    /// Read every entry, skipping malformed lines.
    pub fn read_all(&self) -> Vec<ActivityEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<ActivityEntry>(&line).ok())
            .collect()
    }

    /// The last `limit` entries, oldest first.
    pub fn read_recent(&self, limit: usize) -> Vec<ActivityEntry> {
        let mut entries = self.read_all();
        let skip = entries.len().saturating_sub(limit);
        entries.split_off(skip)
    }
}

/// `~/.kvconsole/activity.jsonl`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kvconsole").join("activity.jsonl"))
}
