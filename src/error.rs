//! The error and result types for lexiscan
use std::path::PathBuf;

/// The result of a lexiscan operation
pub type Result<T> = std::result::Result<T, Error>;

/// A lexiscan error
///
/// Variants fall into three groups: resource loading (tagger binary,
/// dictionary XML, supplemental changelog, cache reads), use of the
/// dictionary store before it was loaded, and text analysis (tagger output
/// that violates the column contract or cannot be aligned to the source).
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An external resource is missing or unusable
    #[error("failed to load resource at {path:?}: {message}")]
    ResourceLoad { path: PathBuf, message: String },

    /// The dictionary XML does not follow the expected schema
    #[error("malformed dictionary XML in record `{entry_id}`: {message}")]
    DictionarySchema { entry_id: String, message: String },

    /// A dictionary store accessor was used before any data was loaded
    #[error("dictionary store used before any dictionary data was loaded")]
    ResourceNotReady,

    /// A tagger output line had an unexpected number of columns
    #[error("unexpected number of tagger columns ({count}) in line `{line}`")]
    UnexpectedTokenColumns { count: usize, line: String },

    /// A surface form from the tagger could not be located in the source text
    #[error("could not align surface form `{surface}` in text after char offset {offset}")]
    SurfaceAlignment { surface: String, offset: usize },

    /// IO error
    #[error("IO error for {path:?}: {err}")]
    IOError { path: PathBuf, err: std::io::Error },
}

impl Error {
    /// Build a [`Error::ResourceLoad`] for a path with a message
    pub(crate) fn resource(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ResourceLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a [`Error::IOError`] for a path
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::IOError {
            path: path.into(),
            err,
        }
    }
}
