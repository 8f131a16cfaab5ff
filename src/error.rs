//! Error types for the docseq library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docseq operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while numbering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input document could not be opened or is not a word-processing package.
    #[error("failed to load document '{}': {source}", path.display())]
    DocumentLoad {
        /// Path of the input document
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: Box<Error>,
    },

    /// The placeholder pattern is invalid.
    #[error("invalid pattern: {0}")]
    Pattern(String),

    /// The output document could not be written.
    #[error("failed to save document '{}': {source}", path.display())]
    DocumentSave {
        /// Path of the output document
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: Box<Error>,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not an Office Open XML package.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The package is recognized but is not a word-processing document.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading or writing the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required document component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),
}

impl Error {
    /// Wrap an error as a load failure for `path`.
    pub fn load(path: impl Into<PathBuf>, source: Error) -> Self {
        match source {
            err @ Error::DocumentLoad { .. } => err,
            other => Error::DocumentLoad {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// Wrap an error as a save failure for `path`.
    pub fn save(path: impl Into<PathBuf>, source: Error) -> Self {
        match source {
            err @ Error::DocumentSave { .. } => err,
            other => Error::DocumentSave {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}
