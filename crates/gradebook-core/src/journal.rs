//! Operation log: an append-only, human-readable record of what the program did.
//!
//! Lines look like `2024-05-01 12:00:00,123 - INFO - Program start`. The log is
//! an explicit handle passed to whoever writes to it; nothing here installs a
//! global subscriber.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;

/// Destination for operation log lines.
pub trait OperationLog: Send + Sync {
    /// Record one message at the given level.
    fn record(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.record(Level::INFO, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::ERROR, message);
    }
}

/// Format a log line for `level` and `message` with the current local time.
pub fn format_line(level: Level, message: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
    format!("{timestamp} - {level} - {message}")
}

/// Appends log lines to a file on disk.
pub struct FileLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLog {
    /// Open (or create) `path` in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file: {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for FileLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLog").field("path", &self.path).finish()
    }
}

impl OperationLog for FileLog {
    fn record(&self, level: Level, message: &str) {
        let line = format_line(level, message);
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // A failed log write must not abort the operation being logged.
        if let Err(e) = writeln!(file, "{line}") {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write operation log");
        }
    }
}

/// Keeps log lines in memory. Useful in tests and for callers that inspect
/// what would have been written.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded `(level, message)` pairs, oldest first.
    pub fn entries(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Recorded messages without their levels.
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, m)| m).collect()
    }
}

impl OperationLog for MemoryLog {
    fn record(&self, level: Level, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, message.to_string()));
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl OperationLog for NullLog {
    fn record(&self, _level: Level, _message: &str) {}
}
