//! High-level public API for archive extraction and compression.
//!
//! Each function builds an [`Archiver`] with the built-in backends and the
//! given configuration, then runs a single operation.

use std::path::Path;

use crate::Archiver;
use crate::ArchiverConfig;
use crate::OperationResult;
use crate::Result;
use crate::types::ListedEntry;

/// Extracts an archive into `destination`, creating it if absent.
///
/// The format is picked from the archive's file name.
///
/// # Errors
///
/// See [`Archiver::extract`].
///
/// # Examples
///
/// ```no_run
/// use archiver_core::ArchiverConfig;
/// use archiver_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = extract_archive("test.tar.bz2", "/tmp/output", &ArchiverConfig::default())?;
/// println!("Extracted {} entries", result.entries().len());
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    destination: Q,
    config: &ArchiverConfig,
) -> Result<OperationResult> {
    Archiver::new(config.clone()).extract(archive, destination)
}

/// Creates an archive from source files and directories.
///
/// The format is picked from the archive's file name.
///
/// # Errors
///
/// See [`Archiver::compress`].
///
/// # Examples
///
/// ```no_run
/// use archiver_core::ArchiverConfig;
/// use archiver_core::compress_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ArchiverConfig::default().with_compression_level(9);
/// let result = compress_archive("backup.zip", &["src", "Cargo.toml"], &config)?;
/// println!("Added {} files", result.files);
/// # Ok(())
/// # }
/// ```
pub fn compress_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    sources: &[Q],
    config: &ArchiverConfig,
) -> Result<OperationResult> {
    Archiver::new(config.clone()).compress(archive, sources)
}

/// Lists the entries of an archive without extracting it.
///
/// # Errors
///
/// See [`Archiver::list`].
pub fn list_archive<P: AsRef<Path>>(archive: P) -> Result<Vec<ListedEntry>> {
    Archiver::default().list(archive)
}
