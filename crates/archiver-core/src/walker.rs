//! Expansion of compression sources into archive entries.
//!
//! Every source is named relative to its own parent directory: the file
//! `data/testfile_1.txt` becomes `testfile_1.txt`, the directory
//! `data/folder` becomes `folder` followed by everything below it.

use crate::ArchiverConfig;
use crate::error::BackendError;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Type of a source entry on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link stored as a link.
    Symlink {
        /// Target of the symlink.
        target: PathBuf,
    },
}

/// A filesystem entry ready to be added to an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Relative path to use inside the archive.
    pub archive_path: PathBuf,

    /// Type of entry.
    pub kind: SourceKind,

    /// Size in bytes (0 for directories and links).
    pub size: u64,
}

impl SourceEntry {
    /// Returns the archive path with `/` separators, as zip and tar store it.
    #[must_use]
    pub fn archive_name(&self) -> String {
        self.archive_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Walks every source and returns the entries in a stable order.
///
/// Directories are walked recursively, sorted by file name, parents before
/// children. Entries resolving to `skip` (the archive being written) are left
/// out.
///
/// # Errors
///
/// Returns [`BackendError::SourceNotFound`] if a source does not exist, or
/// [`BackendError::Walk`] if a directory cannot be traversed.
pub fn collect_sources<P: AsRef<Path>>(
    sources: &[P],
    config: &ArchiverConfig,
    skip: Option<&Path>,
) -> Result<Vec<SourceEntry>, BackendError> {
    let skip = skip.and_then(|path| path.canonicalize().ok());
    let mut entries = Vec::new();

    for source in sources {
        let source = source.as_ref();

        if std::fs::symlink_metadata(source).is_err() {
            return Err(BackendError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        // "." and ".." have no file name to store; use the resolved directory.
        let source = if source.file_name().is_some() {
            source.to_path_buf()
        } else {
            source.canonicalize()?
        };
        let base = source.parent().unwrap_or_else(|| Path::new(""));

        let walker = WalkDir::new(&source)
            .follow_links(config.follow_symlinks)
            .follow_root_links(config.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;

            if let Some(skip) = &skip
                && entry.file_type().is_file()
                && entry.file_name() == skip.file_name().unwrap_or_default()
                && entry.path().canonicalize().is_ok_and(|p| &p == skip)
            {
                log::debug!("skipping {} (archive being written)", entry.path().display());
                continue;
            }

            entries.push(build_entry(&entry, base)?);
        }
    }

    Ok(entries)
}

fn build_entry(entry: &walkdir::DirEntry, base: &Path) -> Result<SourceEntry, BackendError> {
    let path = entry.path().to_path_buf();
    let file_type = entry.file_type();

    let (kind, size) = if file_type.is_symlink() {
        let target = std::fs::read_link(&path)?;
        (SourceKind::Symlink { target }, 0)
    } else if file_type.is_dir() {
        (SourceKind::Directory, 0)
    } else {
        (SourceKind::File, entry.metadata()?.len())
    };

    let archive_path = path
        .strip_prefix(base)
        .map_or_else(|_| PathBuf::from(entry.file_name()), Path::to_path_buf);

    Ok(SourceEntry {
        path,
        archive_path,
        kind,
        size,
    })
}
