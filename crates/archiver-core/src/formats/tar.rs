//! Tar backend, optionally wrapped in gzip or bzip2.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use tar::Builder;
use tar::Header;
use tar::HeaderMode;

use super::compression::CompressionCodec;
use super::compression::compression_level_to_bzip2;
use super::compression::compression_level_to_flate2;
use super::traits::ArchiveBackend;
use super::traits::BackendOutput;
use crate::ArchiverConfig;
use crate::error::BackendError;
use crate::types::EntryKind;
use crate::types::ListedEntry;
use crate::types::check_resolved_within;
use crate::types::check_symlink_target;
use crate::types::sanitize_entry_path;
use crate::walker::SourceEntry;
use crate::walker::SourceKind;

/// Tar archive handler for `.tar`, `.tar.gz` and `.tar.bz2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TarBackend {
    codec: Option<CompressionCodec>,
}

impl TarBackend {
    /// Creates a tar handler using `codec` around the tar stream.
    #[must_use]
    pub const fn new(codec: Option<CompressionCodec>) -> Self {
        Self { codec }
    }

    /// Uncompressed tar.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(None)
    }

    /// Gzip-compressed tar.
    #[must_use]
    pub const fn gzip() -> Self {
        Self::new(Some(CompressionCodec::Gzip))
    }

    /// Bzip2-compressed tar.
    #[must_use]
    pub const fn bzip2() -> Self {
        Self::new(Some(CompressionCodec::Bzip2))
    }

    /// Returns the codec wrapped around the tar stream.
    #[must_use]
    pub const fn codec(&self) -> Option<CompressionCodec> {
        self.codec
    }

    fn open(&self, archive: &Path) -> Result<tar::Archive<Box<dyn Read>>, BackendError> {
        let file = BufReader::new(File::open(archive)?);
        let reader: Box<dyn Read> = match self.codec {
            None => Box::new(file),
            Some(CompressionCodec::Gzip) => Box::new(flate2::read::GzDecoder::new(file)),
            Some(CompressionCodec::Bzip2) => Box::new(bzip2::read::BzDecoder::new(file)),
        };
        Ok(tar::Archive::new(reader))
    }
}

impl Default for TarBackend {
    fn default() -> Self {
        Self::plain()
    }
}

impl ArchiveBackend for TarBackend {
    fn name(&self) -> &'static str {
        match self.codec {
            None => "tar",
            Some(codec) => codec.extension(),
        }
    }

    fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        config: &ArchiverConfig,
    ) -> Result<BackendOutput, BackendError> {
        let mut tar = self.open(archive)?;
        tar.set_overwrite(true);
        tar.set_preserve_permissions(config.preserve_permissions);

        let root = destination.canonicalize()?;
        let mut output = BackendOutput::default();

        for entry in tar.entries()? {
            let mut entry = entry?;
            let relative = sanitize_entry_path(&entry.path()?)?;
            if relative.as_os_str().is_empty() {
                continue;
            }

            let entry_type = entry.header().entry_type();
            let size = entry.size();

            if entry_type.is_symlink()
                && let Some(target) = entry.link_name()?
            {
                check_symlink_target(&relative, &target)?;
            }

            let target = destination.join(&relative);
            let written_through = if entry_type.is_dir() {
                target.as_path()
            } else {
                target.parent().unwrap_or(destination)
            };
            check_resolved_within(&root, written_through, &relative)?;

            // Already sanitized, so a skipped entry means tar found something else wrong.
            if !entry.unpack_in(destination)? {
                return Err(BackendError::UnsafeEntry { path: relative });
            }
            log::debug!("extracted {}", relative.display());

            if entry_type.is_dir() {
                output.directories += 1;
            } else {
                output.files += 1;
                output.bytes_written += size;
            }
            output.entries.push(target);
        }

        Ok(output)
    }

    fn compress(
        &self,
        output: &mut File,
        sources: &[SourceEntry],
        config: &ArchiverConfig,
    ) -> Result<BackendOutput, BackendError> {
        match self.codec {
            None => {
                let (file, report) = write_tar(output, sources, config)?;
                file.flush()?;
                Ok(report)
            }
            Some(CompressionCodec::Gzip) => {
                let level = compression_level_to_flate2(config.compression_level);
                let encoder = flate2::write::GzEncoder::new(output, level);
                let (encoder, report) = write_tar(encoder, sources, config)?;
                encoder.finish()?.flush()?;
                Ok(report)
            }
            Some(CompressionCodec::Bzip2) => {
                let level = compression_level_to_bzip2(config.compression_level);
                let encoder = bzip2::write::BzEncoder::new(output, level);
                let (encoder, report) = write_tar(encoder, sources, config)?;
                encoder.finish()?.flush()?;
                Ok(report)
            }
        }
    }

    fn list(&self, archive: &Path) -> Result<Vec<ListedEntry>, BackendError> {
        let mut tar = self.open(archive)?;
        let mut listed = Vec::new();

        for entry in tar.entries()? {
            let entry = entry?;
            let entry_type = entry.header().entry_type();
            let kind = if entry_type.is_dir() {
                EntryKind::Directory
            } else if entry_type.is_symlink() || entry_type.is_hard_link() {
                EntryKind::Symlink
            } else {
                EntryKind::File
            };
            let size = if kind.is_file() { entry.size() } else { 0 };

            listed.push(ListedEntry {
                path: entry.path()?.into_owned(),
                kind,
                size,
            });
        }

        Ok(listed)
    }
}

/// Appends every source to a tar stream and returns the inner writer.
fn write_tar<W: Write>(
    writer: W,
    sources: &[SourceEntry],
    config: &ArchiverConfig,
) -> Result<(W, BackendOutput), BackendError> {
    let mut builder = Builder::new(writer);
    builder.mode(if config.preserve_permissions {
        HeaderMode::Complete
    } else {
        HeaderMode::Deterministic
    });
    builder.follow_symlinks(config.follow_symlinks);

    let mut report = BackendOutput::default();

    for entry in sources {
        match &entry.kind {
            SourceKind::Directory => {
                builder.append_dir(&entry.archive_path, &entry.path)?;
                report.directories += 1;
            }
            SourceKind::File => {
                let mut file = File::open(&entry.path)?;
                builder.append_file(&entry.archive_path, &mut file)?;
                report.files += 1;
                report.bytes_written += entry.size;
            }
            SourceKind::Symlink { target } => {
                append_symlink(&mut builder, &entry.archive_path, target)?;
                report.files += 1;
            }
        }
        log::debug!("added {}", entry.archive_path.display());
        report.entries.push(entry.archive_path.clone());
    }

    builder.finish()?;
    let writer = builder.into_inner()?;
    Ok((writer, report))
}

fn append_symlink<W: Write>(
    builder: &mut Builder<W>,
    link_path: &Path,
    target: &Path,
) -> Result<(), BackendError> {
    let mut header = Header::new_gnu();
    header.set_entry_type(tar::EntryType::Symlink);
    header.set_mode(0o777);
    header.set_size(0);
    builder.append_link(&mut header, link_path, target)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_backend_names() {
        assert_eq!(TarBackend::plain().name(), "tar");
        assert_eq!(TarBackend::gzip().name(), "tar.gz");
        assert_eq!(TarBackend::bzip2().name(), "tar.bz2");
        assert_eq!(TarBackend::default(), TarBackend::plain());
    }

    #[test]
    fn test_extract_in_memory_tar() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("test.tar");
        fs::write(
            &archive,
            test_utils::create_test_tar(&[
                ("testfile_1.txt", b"one"),
                ("folder/testfile_2.txt", b"two"),
            ]),
        )
        .unwrap();
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();

        let output = TarBackend::plain()
            .extract(&archive, &dest, &ArchiverConfig::default())
            .unwrap();

        assert_eq!(output.files, 2);
        assert_eq!(output.bytes_written, 6);
        assert_eq!(fs::read_to_string(dest.join("testfile_1.txt")).unwrap(), "one");
        assert_eq!(
            fs::read_to_string(dest.join("folder/testfile_2.txt")).unwrap(),
            "two"
        );
        assert!(output.entries.contains(&dest.join("folder/testfile_2.txt")));
    }

    #[test]
    fn test_extract_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.tar");
        fs::write(&archive, test_utils::create_raw_tar("../escape.txt", b"x")).unwrap();
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();

        let result = TarBackend::plain().extract(&archive, &dest, &ArchiverConfig::default());
        assert!(matches!(result, Err(BackendError::UnsafeEntry { .. })));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_extract_rejects_escaping_symlink() {
        let mut header = Header::new_gnu();
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_size(0);
        header.set_mode(0o777);
        let mut builder = Builder::new(Vec::new());
        builder
            .append_link(&mut header, "link", "../../outside")
            .unwrap();
        let data = builder.into_inner().unwrap();

        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("links.tar");
        fs::write(&archive, data).unwrap();
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();

        let result = TarBackend::plain().extract(&archive, &dest, &ArchiverConfig::default());
        assert!(matches!(result, Err(BackendError::UnsafeEntry { .. })));
        assert!(fs::symlink_metadata(dest.join("link")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_rejects_write_through_extracted_links() {
        let mut builder = Builder::new(Vec::new());
        let mut dir = Header::new_gnu();
        dir.set_entry_type(tar::EntryType::Directory);
        dir.set_size(0);
        dir.set_mode(0o755);
        builder.append_data(&mut dir, "d", std::io::empty()).unwrap();
        for (link, target) in [("d/l1", ".."), ("d/l1/l2", "../..")] {
            let mut header = Header::new_gnu();
            header.set_entry_type(tar::EntryType::Symlink);
            header.set_size(0);
            header.set_mode(0o777);
            builder.append_link(&mut header, link, target).unwrap();
        }
        let mut file = Header::new_gnu();
        file.set_size(1);
        file.set_mode(0o644);
        builder
            .append_data(&mut file, "d/l1/l2/escape.txt", &b"x"[..])
            .unwrap();
        let data = builder.into_inner().unwrap();

        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("chain.tar");
        fs::write(&archive, data).unwrap();
        let dest = temp.path().join("a/b");
        fs::create_dir_all(&dest).unwrap();

        let result = TarBackend::plain().extract(&archive, &dest, &ArchiverConfig::default());
        assert!(matches!(result, Err(BackendError::UnsafeEntry { .. })));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_extract_corrupt_gzip() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.tar.gz");
        fs::write(&archive, b"definitely not gzip data").unwrap();
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();

        let result = TarBackend::gzip().extract(&archive, &dest, &ArchiverConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_compress_and_list_each_codec() {
        let temp = test_utils::source_tree();
        let sources = test_utils::source_entries(temp.path());

        for backend in [TarBackend::plain(), TarBackend::gzip(), TarBackend::bzip2()] {
            let archive = temp.path().join(format!("out.{}", backend.name()));
            let mut file = File::create(&archive).unwrap();
            let report = backend
                .compress(&mut file, &sources, &ArchiverConfig::default())
                .unwrap();
            drop(file);

            assert_eq!(report.files, 2);
            assert_eq!(report.directories, 1);

            let listed = backend.list(&archive).unwrap();
            let paths: Vec<_> = listed.iter().map(|e| e.path.clone()).collect();
            assert!(paths.contains(&"testfile_1.txt".into()), "{paths:?}");
            assert!(paths.contains(&"folder/testfile_2.txt".into()), "{paths:?}");
            assert!(listed.iter().any(|e| e.kind == EntryKind::Directory));
        }
    }
}
