//! Test helpers for building archives and source trees.
//!
//! # Panics
//!
//! All functions panic on I/O errors; they are only compiled for tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

use crate::ArchiverConfig;
use crate::walker::SourceEntry;
use crate::walker::collect_sources;

/// Creates an in-memory tar archive from `(path, content)` pairs.
pub fn create_test_tar(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut ar = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        ar.append_data(&mut header, path, *data).unwrap();
    }
    ar.into_inner().unwrap()
}

/// Creates a single-entry tar archive without validating the entry name.
///
/// Used to build archives with `..` or absolute names, which the tar
/// builder refuses to write.
pub fn create_raw_tar(name: &str, data: &[u8]) -> Vec<u8> {
    let mut header = tar::Header::new_gnu();
    header.as_gnu_mut().unwrap().name[..name.len()].copy_from_slice(name.as_bytes());
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_entry_type(tar::EntryType::Regular);
    header.set_cksum();

    let mut ar = tar::Builder::new(Vec::new());
    ar.append(&header, data).unwrap();
    ar.into_inner().unwrap()
}

/// Creates an in-memory zip archive from `(path, content)` pairs.
///
/// Names ending in `/` become directory entries. Names are written as given,
/// so traversal names can be produced too.
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (path, data) in entries {
        if path.ends_with('/') {
            zip.add_directory(*path, options).unwrap();
        } else {
            zip.start_file(*path, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// Creates `testfile_1.txt` and `folder/testfile_2.txt` in a new temp dir.
pub fn source_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("testfile_1.txt"), "testfile 1 content").unwrap();
    fs::create_dir(temp.path().join("folder")).unwrap();
    fs::write(temp.path().join("folder/testfile_2.txt"), "testfile 2 content").unwrap();
    temp
}

/// Walks `testfile_1.txt` and `folder` below `root`.
pub fn source_entries(root: &Path) -> Vec<SourceEntry> {
    collect_sources(
        &[root.join("testfile_1.txt"), root.join("folder")],
        &ArchiverConfig::default(),
        None,
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_tar() {
        let data = create_test_tar(&[("file.txt", b"hello")]);
        assert_eq!(data.len() % 512, 0);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_create_raw_tar_keeps_name() {
        let data = create_raw_tar("../escape.txt", b"x");
        let mut archive = tar::Archive::new(Cursor::new(data));
        let entry = archive.entries().unwrap().next().unwrap().unwrap();
        assert_eq!(entry.path_bytes().as_ref(), b"../escape.txt");
    }

    #[test]
    fn test_create_test_zip() {
        let data = create_test_zip(&[("dir/", b""), ("dir/file.txt", b"hello")]);
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_source_tree() {
        let temp = source_tree();
        assert_eq!(source_entries(temp.path()).len(), 3);
    }
}
