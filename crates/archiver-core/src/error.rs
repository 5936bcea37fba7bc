//! Error types for archive resolution, extraction and compression.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiverError`.
pub type Result<T> = std::result::Result<T, ArchiverError>;

/// Coarse classification of an [`ArchiverError`].
///
/// Front ends use this to pick an exit status or a message style without
/// matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No backend matches the archive path.
    NotFound,
    /// Extraction failed inside a backend.
    Extraction,
    /// Compression failed inside a backend.
    Compression,
    /// The caller supplied an unusable path or configuration.
    InvalidInput,
}

/// Failure raised by a backend adapter.
///
/// The dispatcher never returns these directly; they are wrapped in
/// [`ArchiverError::Extraction`] or [`ArchiverError::Compression`] together
/// with the archive path involved.
#[derive(Error, Debug)]
pub enum BackendError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The zip library rejected the archive or an entry.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Walking a source directory failed.
    #[error("cannot walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// An entry would be written outside the destination directory.
    #[error("entry escapes destination directory: {path}")]
    UnsafeEntry {
        /// Entry path as stored in the archive.
        path: PathBuf,
    },

    /// A compression source does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// Compression was requested without any source.
    #[error("no source files or directories given")]
    NoSources,

    /// The archive content is malformed.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

/// Errors surfaced by the archiver.
#[derive(Error, Debug)]
pub enum ArchiverError {
    /// No backend is registered for the path's extension.
    #[error("No matching archiver found for archive {}", path.display())]
    NotFound {
        /// The path that could not be resolved.
        path: PathBuf,
    },

    /// A backend failed while extracting.
    #[error("failed to extract {}: {source}", archive.display())]
    Extraction {
        /// The archive being extracted.
        archive: PathBuf,
        /// Underlying backend failure.
        #[source]
        source: BackendError,
    },

    /// A backend failed while compressing.
    #[error("failed to compress {}: {source}", archive.display())]
    Compression {
        /// The archive being written.
        archive: PathBuf,
        /// Underlying backend failure.
        #[source]
        source: BackendError,
    },

    /// The archive path is unusable (for example empty).
    #[error("invalid archive path: {reason}")]
    InvalidPath {
        /// Why the path was rejected.
        reason: String,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}: expected 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl ArchiverError {
    /// Wraps a backend failure that happened while extracting `archive`.
    pub fn extraction(archive: impl Into<PathBuf>, source: impl Into<BackendError>) -> Self {
        Self::Extraction {
            archive: archive.into(),
            source: source.into(),
        }
    }

    /// Wraps a backend failure that happened while compressing into `archive`.
    pub fn compression(archive: impl Into<PathBuf>, source: impl Into<BackendError>) -> Self {
        Self::Compression {
            archive: archive.into(),
            source: source.into(),
        }
    }

    /// Returns the classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use archiver_core::ArchiverError;
    /// use archiver_core::ErrorKind;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiverError::NotFound {
    ///     path: PathBuf::from("test.unknown"),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Extraction { .. } => ErrorKind::Extraction,
            Self::Compression { .. } => ErrorKind::Compression,
            Self::InvalidPath { .. } | Self::InvalidCompressionLevel { .. } => {
                ErrorKind::InvalidInput
            }
        }
    }

    /// Returns the path the error is about, if it carries one.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NotFound { path } => Some(path),
            Self::Extraction { archive, .. } | Self::Compression { archive, .. } => Some(archive),
            Self::InvalidPath { .. } | Self::InvalidCompressionLevel { .. } => None,
        }
    }

    /// Returns the backend failure, for extraction and compression errors.
    #[must_use]
    pub const fn backend_error(&self) -> Option<&BackendError> {
        match self {
            Self::Extraction { source, .. } | Self::Compression { source, .. } => Some(source),
            _ => None,
        }
    }
}
