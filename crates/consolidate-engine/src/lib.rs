//! Discovery and reorganization engine.
//!
//! Pipeline, leaves first:
//! - [`crawler`]: walk a root and yield leaf project directories
//! - [`identity`] / [`dates`]: derive the grouping key and representative date
//! - [`index`]: group instances by identity
//! - [`select`]: mark one primary per group
//! - [`plan`]: compute destination paths
//! - [`transfer`]: move or copy project trees
//! - [`manifest`]: snapshot the index as JSON
//!
//! Operator interaction, progress display and log persistence are consumed
//! through the [`DecisionProvider`], [`ProgressSink`] and [`Logger`] traits.

pub mod crawler;
pub mod dates;
pub mod decision;
pub mod error;
pub mod identity;
pub mod index;
pub mod logger;
pub mod manifest;
pub mod markers;
pub mod plan;
pub mod progress;
pub mod select;
pub mod transfer;

pub use crawler::{Crawler, DEFAULT_IGNORE_PATTERNS, DiscoveredProject, IgnoreSet};
pub use dates::DateResolver;
pub use decision::{AcceptDefaults, ChoiceInput, DecisionProvider, parse_choice, parse_yes_no};
pub use error::{Error, Result};
pub use identity::{IdentityResolver, IdentitySource, ResolvedIdentity};
pub use index::ProjectIndex;
pub use logger::{Logger, NullLogger};
pub use manifest::{Manifest, ManifestRecord, ManifestWriter};
pub use markers::detect_marker;
pub use plan::{DestinationPlanner, VERSIONS_DIR};
pub use progress::{NoProgress, ProgressSink};
pub use select::PrimarySelector;
pub use transfer::{DEFAULT_PROGRESS_DEPTH, TransferFailure, TransferReport, Transferer};
