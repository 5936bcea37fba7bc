//! Mapping of errors to exit codes and one-line messages.
//!
//! Command plumbing returns `anyhow` errors; when the root cause is an
//! [`ArchiverError`] its kind picks the exit status.

use archiver_core::ArchiverError;
use archiver_core::ErrorKind;

/// Any failure without a more specific code.
pub const EXIT_FAILURE: u8 = 1;
/// Invalid arguments or configuration (also used by clap).
pub const EXIT_USAGE: u8 = 2;
/// No archiver matches the archive extension.
pub const EXIT_NOT_FOUND: u8 = 3;
/// Extraction or listing failed.
pub const EXIT_EXTRACTION: u8 = 4;
/// Compression failed.
pub const EXIT_COMPRESSION: u8 = 5;

fn archiver_error(err: &anyhow::Error) -> Option<&ArchiverError> {
    err.chain().find_map(|cause| cause.downcast_ref::<ArchiverError>())
}

/// Returns the process exit code for `err`.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    archiver_error(err).map_or(EXIT_FAILURE, |err| match err.kind() {
        ErrorKind::NotFound => EXIT_NOT_FOUND,
        ErrorKind::Extraction => EXIT_EXTRACTION,
        ErrorKind::Compression => EXIT_COMPRESSION,
        ErrorKind::InvalidInput => EXIT_USAGE,
    })
}

/// Renders `err` on a single line.
///
/// Core errors already carry their cause in their message, so only the
/// context added on top of them is prepended.
pub fn message(err: &anyhow::Error) -> String {
    let mut parts = Vec::new();
    for cause in err.chain() {
        parts.push(cause.to_string());
        if cause.downcast_ref::<ArchiverError>().is_some() {
            break;
        }
    }
    parts.join(": ").replace('\n', " ")
}
