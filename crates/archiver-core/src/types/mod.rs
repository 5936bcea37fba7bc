//! Value types passed through the registry, dispatcher and backends.
//!
//! Every type here is created per call and discarded when the call returns.

pub mod archive_format;
pub mod archive_path;
pub mod entry_type;
pub mod safe_path;

pub use archive_format::ArchiveFormat;
pub use archive_path::ArchivePath;
pub use entry_type::EntryKind;
pub use entry_type::ListedEntry;
pub use safe_path::check_resolved_within;
pub use safe_path::check_symlink_target;
pub use safe_path::sanitize_entry_path;
