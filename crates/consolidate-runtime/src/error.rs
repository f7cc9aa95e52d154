use std::fmt;
use std::path::PathBuf;

/// Result type for consolidate-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Engine layer error
    Engine(consolidate_engine::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Root path missing or not a directory
    InvalidRoot(PathBuf),

    /// Output location unusable
    InvalidOutput(String),

    /// Output exists and overwriting was not allowed
    OutputExists(PathBuf),

    /// Output lies inside a discovered project, which would copy into itself
    OutputInsideProject { output: PathBuf, project: PathBuf },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Engine(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidRoot(path) => {
                write!(f, "Root {} does not exist or is not a directory", path.display())
            }
            Error::InvalidOutput(msg) => write!(f, "Invalid output: {}", msg),
            Error::OutputExists(path) => write!(
                f,
                "{} already exists; pass --overwrite to reuse it",
                path.display()
            ),
            Error::OutputInsideProject { output, project } => write!(
                f,
                "Output {} lies inside project {}; choose an output outside every project",
                output.display(),
                project.display()
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Engine(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_)
            | Error::InvalidRoot(_)
            | Error::InvalidOutput(_)
            | Error::OutputExists(_)
            | Error::OutputInsideProject { .. } => None,
        }
    }
}

impl From<consolidate_engine::Error> for Error {
    fn from(err: consolidate_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
