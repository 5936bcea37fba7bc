//! Operation reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::formats::BackendOutput;
use crate::types::ArchiveFormat;

/// What an operation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutput {
    /// Paths written below the destination directory.
    Extracted(Vec<PathBuf>),

    /// Path of the archive that was created.
    Compressed(PathBuf),
}

/// Report of a successful extract or compress call.
///
/// A failed call returns an error instead, so holding one of these means the
/// operation succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    /// Format the archive was resolved to.
    pub format: ArchiveFormat,

    /// Extracted entries or created archive.
    pub output: OperationOutput,

    /// Number of file (and link) entries processed.
    pub files: usize,

    /// Number of directory entries processed.
    pub directories: usize,

    /// Uncompressed payload bytes.
    pub bytes_written: u64,

    /// Wall-clock duration of the operation.
    pub duration: Duration,
}

impl OperationResult {
    pub(crate) fn extracted(
        format: ArchiveFormat,
        backend: BackendOutput,
        duration: Duration,
    ) -> Self {
        Self {
            format,
            files: backend.files,
            directories: backend.directories,
            bytes_written: backend.bytes_written,
            output: OperationOutput::Extracted(backend.entries),
            duration,
        }
    }

    pub(crate) fn compressed(
        format: ArchiveFormat,
        archive: PathBuf,
        backend: &BackendOutput,
        duration: Duration,
    ) -> Self {
        Self {
            format,
            files: backend.files,
            directories: backend.directories,
            bytes_written: backend.bytes_written,
            output: OperationOutput::Compressed(archive),
            duration,
        }
    }

    /// Returns the extracted entry paths; empty for compression.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        match &self.output {
            OperationOutput::Extracted(entries) => entries,
            OperationOutput::Compressed(_) => &[],
        }
    }

    /// Returns the created archive path, for compression.
    #[must_use]
    pub fn archive(&self) -> Option<&Path> {
        match &self.output {
            OperationOutput::Compressed(path) => Some(path),
            OperationOutput::Extracted(_) => None,
        }
    }

    /// Returns total number of items processed.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.files + self.directories
    }
}
