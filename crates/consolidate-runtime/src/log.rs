use chrono::{DateTime, Local};
use consolidate_engine::Logger;
use consolidate_types::LogLevel;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Entries kept in memory before an automatic flush
pub const DEFAULT_FLUSH_THRESHOLD: usize = 64;

/// Buffered, append-only run log.
///
/// Lines look like `16-10-2026 14:03:22 [WARN] message`. Every entry is also
/// forwarded to `tracing` so the console subscriber can show it. Clones share
/// one buffer, which lets a signal handler flush what the main thread logged.
#[derive(Debug, Clone)]
pub struct RunLog {
    inner: Arc<Mutex<LogBuffer>>,
}

#[derive(Debug)]
struct LogBuffer {
    path: Option<PathBuf>,
    pending: Vec<String>,
    /// Everything logged, only retained for in-memory logs
    history: Vec<String>,
    threshold: usize,
}

impl RunLog {
    /// Log appending to `path`; the file is created on first flush
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_target(Some(path.into()))
    }

    /// Log that never touches the filesystem; see [`RunLog::lines`]
    pub fn in_memory() -> Self {
        Self::with_target(None)
    }

    fn with_target(path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogBuffer {
                path,
                pending: Vec::new(),
                history: Vec::new(),
                threshold: DEFAULT_FLUSH_THRESHOLD,
            })),
        }
    }

    pub fn with_flush_threshold(self, threshold: usize) -> Self {
        self.lock().threshold = threshold.max(1);
        self
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    /// Lines logged so far by an in-memory log
    pub fn lines(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    pub fn format_line(at: DateTime<Local>, level: LogLevel, message: &str) -> String {
        format!("{} [{}] {}", at.format("%d-%m-%Y %H:%M:%S"), level, message)
    }

    fn lock(&self) -> MutexGuard<'_, LogBuffer> {
        // A panic while holding the lock must not cost us the log
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogBuffer {
    fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let Some(path) = &self.path else {
            self.pending.clear();
            return Ok(());
        };

        append_lines(path, &self.pending)?;
        self.pending.clear();
        Ok(())
    }
}

fn append_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    file.flush()
}

impl Logger for RunLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
            LogLevel::System => tracing::debug!(kind = "system", "{}", message),
        }

        let line = Self::format_line(Local::now(), level, message);
        let mut buffer = self.lock();
        if buffer.path.is_none() {
            buffer.history.push(line.clone());
        }
        buffer.pending.push(line);

        if buffer.pending.len() >= buffer.threshold
            && let Err(err) = buffer.flush()
        {
            tracing::warn!("Failed to write run log: {}", err);
        }
    }

    fn flush(&self) -> std::io::Result<()> {
        self.lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_line_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            RunLog::format_line(at, LogLevel::Warn, "disk slow"),
            "07-03-2024 09:05:01 [WARN] disk slow"
        );
    }

    #[test]
    fn test_entries_buffered_until_flush() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs/run.log");
        let log = RunLog::open(&path);

        log.log(LogLevel::System, "Run started");
        log.info("found project");
        assert!(!path.exists());

        log.flush().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[SYSTEM] Run started"));
        assert!(lines[1].ends_with("[INFO] found project"));
    }

    #[test]
    fn test_threshold_triggers_flush_and_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.log");
        std::fs::write(&path, "previous run\n").unwrap();

        let log = RunLog::open(&path).with_flush_threshold(2);
        log.warn("one");
        log.error("two");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("previous run\n"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_clones_share_buffer() {
        let log = RunLog::in_memory();
        let handle = log.clone();
        log.info("from main");
        handle.error("from handler");

        assert_eq!(log.lines().len(), 2);
        assert!(handle.flush().is_ok());
    }
}
