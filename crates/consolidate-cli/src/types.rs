use clap::ValueEnum;
use consolidate_types::{CollisionPolicy, DateStrategy, LayoutMode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Layout {
    Dated,
    Flat,
}

impl From<Layout> for LayoutMode {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Dated => LayoutMode::Dated,
            Layout::Flat => LayoutMode::Flat,
        }
    }
}

/// Where a project's representative date comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DateSource {
    /// Newest file modification time
    Filesystem,
    /// Copyright year in LICENSE/index.html, falling back to filesystem
    Content,
}

impl From<DateSource> for DateStrategy {
    fn from(source: DateSource) -> Self {
        match source {
            DateSource::Filesystem => DateStrategy::Filesystem,
            DateSource::Content => DateStrategy::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Collisions {
    /// Append -2, -3, ... to later claimants
    Suffix,
    /// Abort the run
    Reject,
}

impl From<Collisions> for CollisionPolicy {
    fn from(collisions: Collisions) -> Self {
        match collisions {
            Collisions::Suffix => CollisionPolicy::Suffix,
            Collisions::Reject => CollisionPolicy::Reject,
        }
    }
}
