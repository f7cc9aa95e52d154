//! Testing infrastructure for consolidate integration tests.
//!
//! - `TestWorld`: fluent builder for a scratch share, output directory and CLI runs
//! - `fixtures`: marker file contents and fixed timestamps
//! - `decisions`: scripted operator answers
//! - `logger`: a logger that records entries for inspection
//! - `assertions`: checks over manifest JSON

pub mod assertions;
pub mod decisions;
pub mod fixtures;
pub mod logger;
pub mod world;

pub use decisions::ScriptedDecisions;
pub use logger::RecordingLogger;
pub use world::{CliResult, TestWorld};
