use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Deduplication key shared by every copy of the same logical project
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Create a new IdentityKey (declared name, hex digest or synthetic key)
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IdentityKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IdentityKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for IdentityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which marker rule qualified a directory as a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `package.json`, may declare a project name
    PackageManifest,
    /// `requirements.txt`
    DependencyList,
    /// Solution or project file matched by extension (`*.sln`, `*.pyproj`, ...)
    SolutionFile,
    /// `README.md`, the catch-all fallback
    Documentation,
}

impl MarkerKind {
    pub fn label(&self) -> &'static str {
        match self {
            MarkerKind::PackageManifest => "package manifest",
            MarkerKind::DependencyList => "dependency list",
            MarkerKind::SolutionFile => "solution file",
            MarkerKind::Documentation => "documentation",
        }
    }
}

/// Marker file that qualified a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub path: PathBuf,
}

impl Marker {
    pub fn new(kind: MarkerKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// One discovered copy of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInstance {
    pub source_path: PathBuf,
    pub identity_key: IdentityKey,
    pub representative_date: NaiveDate,
    pub is_primary: bool,
    pub destination_path: Option<PathBuf>,
}

impl ProjectInstance {
    pub fn new(
        source_path: impl Into<PathBuf>,
        identity_key: IdentityKey,
        representative_date: NaiveDate,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            identity_key,
            representative_date,
            is_primary: false,
            destination_path: None,
        }
    }

    /// Final path component of the source directory
    pub fn leaf_name(&self) -> String {
        crate::leaf_name(&self.source_path)
    }

    pub fn source(&self) -> &Path {
        &self.source_path
    }
}
