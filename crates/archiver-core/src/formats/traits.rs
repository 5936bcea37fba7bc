//! Backend adapter contract.

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiverConfig;
use crate::error::BackendError;
use crate::types::ListedEntry;
use crate::walker::SourceEntry;

/// Result of one backend operation, before the dispatcher wraps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendOutput {
    /// Paths written: absolute destination paths when extracting, archive
    /// entry names when compressing.
    pub entries: Vec<PathBuf>,
    /// Number of file (and link) entries.
    pub files: usize,
    /// Number of directory entries.
    pub directories: usize,
    /// Uncompressed payload bytes.
    pub bytes_written: u64,
}

/// Format-specific extract/compress/list implementation.
///
/// Adapters hold no per-call state, so one instance may serve concurrent
/// calls on disjoint paths.
pub trait ArchiveBackend: Send + Sync {
    /// Returns the backend name.
    fn name(&self) -> &'static str;

    /// Extracts `archive` into `destination`, which already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read, is corrupt, contains
    /// an entry escaping `destination`, or a write fails.
    fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        config: &ArchiverConfig,
    ) -> Result<BackendOutput, BackendError>;

    /// Writes `sources` as a new archive into `output`.
    ///
    /// `output` is an empty, freshly created file; the caller moves it to the
    /// final archive path once this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the write fails.
    fn compress(
        &self,
        output: &mut File,
        sources: &[SourceEntry],
        config: &ArchiverConfig,
    ) -> Result<BackendOutput, BackendError>;

    /// Lists the entries of `archive` without extracting them.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read or is corrupt.
    fn list(&self, archive: &Path) -> Result<Vec<ListedEntry>, BackendError>;
}
