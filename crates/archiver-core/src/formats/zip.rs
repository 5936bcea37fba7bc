//! Zip backend.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::read::ZipFile;
use zip::write::SimpleFileOptions;

use super::compression::compression_level_to_zip;
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

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

/// Zip archive handler for `.zip`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZipBackend;

impl ZipBackend {
    /// Creates a zip handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ArchiveBackend for ZipBackend {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        config: &ArchiverConfig,
    ) -> Result<BackendOutput, BackendError> {
        let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;
        let root = destination.canonicalize()?;
        let mut output = BackendOutput::default();

        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            let relative = sanitize_entry_path(Path::new(entry.name()))?;
            if relative.as_os_str().is_empty() {
                continue;
            }
            let target = destination.join(&relative);

            if entry.is_dir() {
                check_resolved_within(&root, &target, &relative)?;
                fs::create_dir_all(&target)?;
                output.directories += 1;
            } else {
                if let Some(parent) = target.parent() {
                    check_resolved_within(&root, parent, &relative)?;
                    fs::create_dir_all(parent)?;
                }
                remove_existing(&target)?;
                if is_symlink(&entry) {
                    write_symlink(&mut entry, &relative, &target)?;
                } else {
                    let mut file = File::create(&target)?;
                    output.bytes_written += io::copy(&mut entry, &mut file)?;
                    if config.preserve_permissions {
                        set_mode(&target, entry.unix_mode())?;
                    }
                }
                output.files += 1;
            }
            log::debug!("extracted {}", relative.display());
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
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level_to_zip(config.compression_level)));

        let mut zip = ZipWriter::new(output);
        let mut report = BackendOutput::default();

        for entry in sources {
            let name = entry.archive_name();
            match &entry.kind {
                SourceKind::Directory => {
                    zip.add_directory(format!("{name}/"), options)?;
                    report.directories += 1;
                }
                SourceKind::File => {
                    let mut file = File::open(&entry.path)?;
                    let file_options = file_options(&file, options, config)?;
                    zip.start_file(name.clone(), file_options)?;
                    report.bytes_written += io::copy(&mut file, &mut zip)?;
                    report.files += 1;
                }
                SourceKind::Symlink { target } => {
                    let target = target.to_string_lossy().into_owned();
                    zip.add_symlink(name.clone(), target, options)?;
                    report.files += 1;
                }
            }
            log::debug!("added {name}");
            report.entries.push(entry.archive_path.clone());
        }

        zip.finish()?.flush()?;
        Ok(report)
    }

    fn list(&self, archive: &Path) -> Result<Vec<ListedEntry>, BackendError> {
        let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))?;
        let mut listed = Vec::with_capacity(zip.len());

        for i in 0..zip.len() {
            let entry = zip.by_index(i)?;
            let kind = if entry.is_dir() {
                EntryKind::Directory
            } else if is_symlink(&entry) {
                EntryKind::Symlink
            } else {
                EntryKind::File
            };
            let size = if kind.is_file() { entry.size() } else { 0 };

            listed.push(ListedEntry {
                path: PathBuf::from(entry.name().trim_end_matches('/')),
                kind,
                size,
            });
        }

        Ok(listed)
    }
}

fn is_symlink<R: Read + Seek>(entry: &ZipFile<'_, R>) -> bool {
    entry
        .unix_mode()
        .is_some_and(|mode| mode & S_IFMT == S_IFLNK)
}

fn file_options(
    file: &File,
    options: SimpleFileOptions,
    config: &ArchiverConfig,
) -> Result<SimpleFileOptions, BackendError> {
    if !config.preserve_permissions {
        return Ok(options);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = file.metadata()?.permissions().mode();
        Ok(options.unix_permissions(mode))
    }

    #[cfg(not(unix))]
    {
        let _ = file;
        Ok(options)
    }
}

/// Recreates a stored symlink. The link body is its target.
fn write_symlink<R: Read>(
    entry: &mut R,
    relative: &Path,
    target: &Path,
) -> Result<(), BackendError> {
    let mut link = String::new();
    entry.read_to_string(&mut link)?;

    check_symlink_target(relative, Path::new(&link))?;

    #[cfg(unix)]
    std::os::unix::fs::symlink(&link, target)?;

    #[cfg(not(unix))]
    fs::write(target, link.as_bytes())?;

    Ok(())
}

/// Removes a file or link left at `target` by an earlier extraction.
///
/// Creating in place would follow a link or fail on a read-only file.
fn remove_existing(target: &Path) -> Result<(), BackendError> {
    if fs::symlink_metadata(target).is_ok_and(|metadata| !metadata.is_dir()) {
        fs::remove_file(target)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: Option<u32>) -> Result<(), BackendError> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode.map(|m| m & 0o7777).filter(|m| *m != 0) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<(), BackendError> {
    Ok(())
}
