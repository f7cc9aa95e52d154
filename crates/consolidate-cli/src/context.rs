use anyhow::{Context, Result};
use consolidate_engine::Logger;
use consolidate_runtime::config::resolve_config_path;
use consolidate_runtime::{Config, RunLog};
use consolidate_types::LogLevel;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub struct ExecutionContext {
    config_path: PathBuf,
    log_file: PathBuf,
    config: OnceCell<Config>,
    log: OnceCell<RunLog>,
}

impl ExecutionContext {
    pub fn new(config: Option<&str>, log_file: PathBuf) -> Result<Self> {
        let config_path = resolve_config_path(config)?;

        Ok(Self {
            config_path,
            log_file,
            config: OnceCell::new(),
            log: OnceCell::new(),
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| {
            Config::load_from(&self.config_path)
                .with_context(|| format!("Failed to load {}", self.config_path.display()))
        })
    }

    /// Run log, opened on first use together with a Ctrl-C handler that
    /// flushes whatever is still buffered before exiting.
    pub fn run_log(&self) -> Result<&RunLog> {
        self.log.get_or_try_init(|| {
            let log = RunLog::open(&self.log_file);
            let handle = log.clone();
            ctrlc::set_handler(move || {
                handle.log(LogLevel::System, "Run interrupted");
                let _ = handle.flush();
                std::process::exit(1);
            })
            .context("Failed to install Ctrl-C handler")?;
            Ok(log)
        })
    }
}
