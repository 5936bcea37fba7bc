//! Entry path sanitizing for extraction.

use crate::error::BackendError;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Normalizes an archive entry path so it stays inside the destination.
///
/// `.` components are dropped. Absolute paths, drive prefixes and `..`
/// components are rejected with [`BackendError::UnsafeEntry`]. An entry that
/// normalizes to nothing (for example `./`) yields an empty path.
///
/// # Examples
///
/// ```
/// use archiver_core::types::sanitize_entry_path;
/// use std::path::Path;
///
/// let path = sanitize_entry_path(Path::new("./folder/testfile_2.txt")).unwrap();
/// assert_eq!(path, Path::new("folder/testfile_2.txt"));
///
/// assert!(sanitize_entry_path(Path::new("../escape.txt")).is_err());
/// assert!(sanitize_entry_path(Path::new("/etc/passwd")).is_err());
/// ```
pub fn sanitize_entry_path(path: &Path) -> Result<PathBuf, BackendError> {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(BackendError::UnsafeEntry {
                    path: path.to_path_buf(),
                });
            }
        }
    }

    Ok(normalized)
}

/// Checks that a symlink stored at `entry` pointing at `target` resolves
/// inside the destination.
///
/// `entry` must already be sanitized. The target is resolved lexically next
/// to the link, so `folder/link -> ../testfile_1.txt` is accepted while
/// `link -> ../outside` and absolute targets are not.
pub fn check_symlink_target(entry: &Path, target: &Path) -> Result<(), BackendError> {
    let unsafe_link = || BackendError::UnsafeEntry {
        path: entry.to_path_buf(),
    };
    let mut depth = entry.parent().map_or(0, |parent| parent.components().count());

    for component in target.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => depth = depth.checked_sub(1).ok_or_else(unsafe_link)?,
            Component::RootDir | Component::Prefix(_) => return Err(unsafe_link()),
        }
    }

    Ok(())
}

/// Checks that `path` resolves inside `root` once symlinks on disk are
/// followed.
///
/// `root` must be canonical. `path` need not exist yet; its deepest existing
/// ancestor is resolved instead. This catches entries that reach outside
/// through a symlink written by an earlier entry of the same archive.
pub fn check_resolved_within(root: &Path, path: &Path, entry: &Path) -> Result<(), BackendError> {
    let mut existing = path;
    while fs::symlink_metadata(existing).is_err() {
        match existing.parent() {
            Some(parent) => existing = parent,
            None => break,
        }
    }

    match existing.canonicalize() {
        Ok(resolved) if resolved.starts_with(root) => Ok(()),
        _ => Err(BackendError::UnsafeEntry {
            path: entry.to_path_buf(),
        }),
    }
}
