//! Archive entry descriptions returned by listing.

use std::path::PathBuf;

/// Kind of entry stored in an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
}

impl EntryKind {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns a one-letter tag, as used by `ls -l` style listings.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::File => '-',
            Self::Directory => 'd',
            Self::Symlink => 'l',
        }
    }
}

/// One entry inside an archive, as reported by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Path of the entry relative to the archive root.
    pub path: PathBuf,
    /// Entry kind.
    pub kind: EntryKind,
    /// Uncompressed size in bytes (0 for directories and links).
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_predicates() {
        assert!(EntryKind::File.is_file());
        assert!(!EntryKind::File.is_directory());
        assert!(EntryKind::Directory.is_directory());
        assert!(!EntryKind::Symlink.is_file());
    }

    #[test]
    fn test_entry_kind_tag() {
        assert_eq!(EntryKind::File.tag(), '-');
        assert_eq!(EntryKind::Directory.tag(), 'd');
        assert_eq!(EntryKind::Symlink.tag(), 'l');
    }
}
