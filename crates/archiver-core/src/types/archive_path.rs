//! Validated archive path type.

use crate::ArchiverError;
use crate::Result;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

/// A non-empty filesystem path naming an archive.
///
/// Construction only checks that the path is non-empty. Existence is checked
/// by the dispatcher when extracting, because compression may target a file
/// that does not exist yet.
///
/// # Examples
///
/// ```
/// use archiver_core::ArchivePath;
///
/// let path = ArchivePath::new("backup/test.tar.gz").unwrap();
/// assert_eq!(path.file_name().unwrap(), "test.tar.gz");
///
/// assert!(ArchivePath::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchivePath(PathBuf);

impl ArchivePath {
    /// Creates a new `ArchivePath`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::InvalidPath`] if the path is empty.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ArchiverError::InvalidPath {
                reason: "archive path is empty".to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns the final component of the path.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.0.file_name()
    }

    /// Converts into the inner `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ArchivePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl TryFrom<&Path> for ArchivePath {
    type Error = ArchiverError;

    fn try_from(path: &Path) -> Result<Self> {
        Self::new(path)
    }
}

impl TryFrom<PathBuf> for ArchivePath {
    type Error = ArchiverError;

    fn try_from(path: PathBuf) -> Result<Self> {
        Self::new(path)
    }
}
