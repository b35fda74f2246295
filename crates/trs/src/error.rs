#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The ways in which reading or writing a TRS can fail.
#[derive(Error, Debug)]
pub enum TrsError {
    /// A required element is missing, or its contents cannot be parsed.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A function application refers to a name that is not in the signature.
    #[error("Unresolved function symbol '{0}'")]
    UnresolvedSymbol(String),

    /// The destination already exists; it is never overwritten.
    #[error("Output file {} already exists", .0.display())]
    OutputAlreadyExists(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TrsError {
    /// Wraps an I/O error that occurred while accessing the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> TrsError {
        TrsError::Io {
            path: path.into(),
            source,
        }
    }
}
