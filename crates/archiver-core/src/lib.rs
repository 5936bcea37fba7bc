//! Archive extraction and compression dispatched on the archive's file name.
//!
//! `archiver-core` maps an archive path to one of the supported formats
//! (tar, tar.gz, tar.bz2, zip) through a priority-ordered suffix table and
//! hands the work to the backend registered for that format.
//!
//! # Examples
//!
//! ```no_run
//! use archiver_core::ArchiverConfig;
//! use archiver_core::compress_archive;
//! use archiver_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArchiverConfig::default();
//! compress_archive("test.tar.gz", &["testfile_1.txt", "folder"], &config)?;
//! let result = extract_archive("test.tar.gz", "/output/dir", &config)?;
//! println!("Extracted {} files", result.files);
//! # Ok(())
//! # }
//! ```
//!
//! Unknown suffixes are rejected before anything touches the disk:
//!
//! ```
//! use archiver_core::Archiver;
//! use archiver_core::ErrorKind;
//!
//! let err = Archiver::default().resolve("test.unknown").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(
//!     err.to_string(),
//!     "No matching archiver found for archive test.unknown"
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archiver;
pub mod config;
pub mod error;
pub mod formats;
pub mod report;
pub mod types;
pub mod walker;

#[cfg(test)]
mod test_utils;

pub use api::compress_archive;
pub use api::extract_archive;
pub use api::list_archive;
pub use archiver::Archiver;
pub use config::ArchiverConfig;
pub use error::ArchiverError;
pub use error::BackendError;
pub use error::ErrorKind;
pub use error::Result;
pub use formats::ArchiveBackend;
pub use formats::BackendOutput;
pub use formats::FormatRegistry;
pub use formats::TarBackend;
pub use formats::ZipBackend;
pub use report::OperationOutput;
pub use report::OperationResult;
pub use types::ArchiveFormat;
pub use types::ArchivePath;
pub use types::EntryKind;
pub use types::ListedEntry;
pub use walker::SourceEntry;
pub use walker::SourceKind;
