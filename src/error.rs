//! Error enum
use std::fmt;
use std::path::PathBuf;

use crate::layout::PathStructureError;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    /// Root of the corpus does not exist or is not a directory.
    MissingRootDirectory(PathBuf),
    PathStructure(PathStructureError),
    /// A bitext file could not be opened or read through.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Two different targets were found for a source under [crate::processing::ConflictPolicy::Reject].
    Conflict {
        language_pair: String,
        source: String,
    },
    InvalidFraction(f64),
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "bad glob pattern: {}", e),
            Error::MissingRootDirectory(p) => write!(f, "root_dir not found: {:?}", p),
            Error::PathStructure(e) => write!(f, "{}", e),
            Error::FileRead { path, source } => write!(f, "failed to read {:?}: {}", path, source),
            Error::Conflict {
                language_pair,
                source,
            } => write!(
                f,
                "[{}] conflicting translations for source {:?}",
                language_pair, source
            ),
            Error::InvalidFraction(v) => {
                write!(f, "minimum fraction must be in (0, 1], got {}", v)
            }
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<PathStructureError> for Error {
    fn from(e: PathStructureError) -> Error {
        Error::PathStructure(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}
