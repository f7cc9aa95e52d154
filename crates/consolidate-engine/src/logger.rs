use consolidate_types::LogLevel;

/// Sink for run log entries.
///
/// Takes `&self` so one logger can be shared by every stage of a run;
/// implementations that buffer must use interior mutability.
pub trait Logger {
    fn log(&self, level: LogLevel, message: &str);

    /// Persist buffered entries now. Called on fatal paths before exiting.
    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
