pub mod config;
pub mod error;
pub mod log;
pub mod options;
pub mod service;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use log::RunLog;
pub use options::{RunMode, RunOptions};
pub use service::{ConsolidationService, RunProgress, RunReport};
pub use validate::validate;
