use std::fmt;
use std::path::PathBuf;

/// Result type for consolidate-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// JSON encoding/decoding failed
    Json(serde_json::Error),

    /// An ignore pattern is not a valid regex
    Pattern(regex::Error),

    /// Decision provider returned an index outside the offered list
    InvalidChoice {
        key: String,
        choice: usize,
        options: usize,
    },

    /// A group ended selection without exactly one primary
    PrimaryInvariant { key: String, primaries: usize },

    /// Two groups planned the same primary destination under the reject policy
    DestinationCollision {
        destination: PathBuf,
        claimed_by: String,
        rejected: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Pattern(err) => write!(f, "Invalid ignore pattern: {}", err),
            Error::InvalidChoice {
                key,
                choice,
                options,
            } => write!(
                f,
                "Invalid primary choice {} for '{}' ({} candidates)",
                choice, key, options
            ),
            Error::PrimaryInvariant { key, primaries } => write!(
                f,
                "Group '{}' has {} primaries, expected exactly one",
                key, primaries
            ),
            Error::DestinationCollision {
                destination,
                claimed_by,
                rejected,
            } => write!(
                f,
                "Destination {} planned for both '{}' and '{}'",
                destination.display(),
                claimed_by,
                rejected
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Pattern(err) => Some(err),
            Error::InvalidChoice { .. }
            | Error::PrimaryInvariant { .. }
            | Error::DestinationCollision { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err)
    }
}
