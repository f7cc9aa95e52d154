use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination layout for primary instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// `Out/<year>/<leaf>`
    #[default]
    Dated,
    /// `Out/<leaf>`
    Flat,
}

/// How a project's representative date is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStrategy {
    /// Newest file modification time under the project
    #[default]
    Filesystem,
    /// Copyright year found in license/index files, falling back to filesystem
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    #[default]
    Move,
    Copy,
}

/// What to do when two groups plan the same primary destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append `-2`, `-3`, ... to the later group's leaf name
    #[default]
    Suffix,
    /// Abort planning
    Reject,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Dated => write!(f, "dated"),
            LayoutMode::Flat => write!(f, "flat"),
        }
    }
}

impl fmt::Display for DateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateStrategy::Filesystem => write!(f, "filesystem"),
            DateStrategy::Content => write!(f, "content"),
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Move => write!(f, "move"),
            TransferMode::Copy => write!(f, "copy"),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Suffix => write!(f, "suffix"),
            CollisionPolicy::Reject => write!(f, "reject"),
        }
    }
}
