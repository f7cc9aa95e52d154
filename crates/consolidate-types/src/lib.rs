pub mod domain;
pub mod log;
pub mod options;
mod util;

pub use domain::*;
pub use log::LogLevel;
pub use options::*;
pub use util::*;
