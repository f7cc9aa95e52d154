use consolidate_engine::Logger;
use consolidate_types::LogLevel;
use std::cell::{Cell, RefCell};

/// Keeps every entry in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: RefCell<Vec<(LogLevel, String)>>,
    flushes: Cell<usize>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.get()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }

    fn flush(&self) -> std::io::Result<()> {
        self.flushes.set(self.flushes.get() + 1);
        Ok(())
    }
}
