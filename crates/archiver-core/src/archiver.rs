//! Format resolution and dispatch to backend adapters.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Instant;

use tempfile::NamedTempFile;

use crate::ArchiverConfig;
use crate::ArchiverError;
use crate::Result;
use crate::error::BackendError;
use crate::formats::ArchiveBackend;
use crate::formats::FormatRegistry;
use crate::formats::TarBackend;
use crate::formats::ZipBackend;
use crate::report::OperationResult;
use crate::types::ArchiveFormat;
use crate::types::ArchivePath;
use crate::types::ListedEntry;
use crate::walker::collect_sources;

/// Resolves archive paths to a format and runs the matching backend.
///
/// Holds no per-call state; one instance can serve concurrent calls as long
/// as they target disjoint paths.
///
/// # Examples
///
/// ```no_run
/// use archiver_core::Archiver;
/// use archiver_core::ArchiverConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archiver = Archiver::new(ArchiverConfig::default());
/// archiver.compress("backup.tar.gz", &["testfile_1.txt", "folder"])?;
/// let result = archiver.extract("backup.tar.gz", "restored")?;
/// println!("extracted {} entries", result.total_items());
/// # Ok(())
/// # }
/// ```
pub struct Archiver {
    registry: FormatRegistry,
    backends: HashMap<ArchiveFormat, Box<dyn ArchiveBackend>>,
    config: ArchiverConfig,
}

impl Archiver {
    /// Creates an archiver with the default suffix table and the built-in
    /// tar, tar.gz, tar.bz2 and zip backends.
    #[must_use]
    pub fn new(config: ArchiverConfig) -> Self {
        let backends = ArchiveFormat::ALL
            .into_iter()
            .map(|format| {
                let backend: Box<dyn ArchiveBackend> = match format {
                    ArchiveFormat::Zip => Box::new(ZipBackend::new()),
                    _ => Box::new(TarBackend::new(format.codec())),
                };
                (format, backend)
            })
            .collect();

        Self {
            registry: FormatRegistry::with_defaults(),
            backends,
            config,
        }
    }

    /// Replaces the backend used for `format`.
    #[must_use]
    pub fn with_backend(
        mut self,
        format: ArchiveFormat,
        backend: impl ArchiveBackend + 'static,
    ) -> Self {
        self.backends.insert(format, Box::new(backend));
        self
    }

    /// Returns the suffix table.
    #[must_use]
    pub const fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Returns the suffix table for registering extra patterns.
    pub const fn registry_mut(&mut self) -> &mut FormatRegistry {
        &mut self.registry
    }

    /// Returns the configuration applied to every call.
    #[must_use]
    pub const fn config(&self) -> &ArchiverConfig {
        &self.config
    }

    /// Resolves `path` to the format a backend is registered for.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::InvalidPath`] for an empty path and
    /// [`ArchiverError::NotFound`] when no suffix or backend matches.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> Result<ArchiveFormat> {
        let path = ArchivePath::new(path.as_ref())?;
        self.backend_for(&path).map(|(format, _)| format)
    }

    /// Extracts `archive` into `destination`, creating it if absent.
    ///
    /// Existing files in `destination` are overwritten. If the backend fails
    /// midway, entries already written are left in place.
    ///
    /// # Errors
    ///
    /// - [`ArchiverError::NotFound`] if the suffix matches no format; nothing
    ///   is created in that case.
    /// - [`ArchiverError::Extraction`] if the archive is missing, unreadable,
    ///   corrupt, contains unsafe entries, or a write fails.
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        archive: P,
        destination: Q,
    ) -> Result<OperationResult> {
        let start = Instant::now();
        let archive = ArchivePath::new(archive.as_ref())?;
        let destination = destination.as_ref();
        let (format, backend) = self.backend_for(&archive)?;
        let path = archive.as_path();

        let metadata = fs::metadata(path).map_err(|e| ArchiverError::extraction(path, e))?;
        if !metadata.is_file() {
            return Err(ArchiverError::extraction(
                path,
                BackendError::InvalidArchive("not a regular file".into()),
            ));
        }

        fs::create_dir_all(destination).map_err(|e| ArchiverError::extraction(path, e))?;

        let output = backend
            .extract(path, destination, &self.config)
            .map_err(|e| ArchiverError::extraction(path, e))?;

        log::info!(
            "extracted {} ({}) into {}: {} files, {} directories",
            archive,
            format,
            destination.display(),
            output.files,
            output.directories
        );

        Ok(OperationResult::extracted(format, output, start.elapsed()))
    }

    /// Compresses `sources` into a new archive at `archive`.
    ///
    /// The format comes from the archive's own suffix. Each source is stored
    /// under its file name, directories recursively. The archive is written
    /// to a temporary file next to it and moved into place on success, so a
    /// failed call leaves no archive behind and an existing one untouched.
    ///
    /// # Errors
    ///
    /// - [`ArchiverError::InvalidCompressionLevel`] for a bad configuration.
    /// - [`ArchiverError::NotFound`] if the suffix matches no format.
    /// - [`ArchiverError::Compression`] if `sources` is empty, a source is
    ///   missing or unreadable, or the write fails.
    pub fn compress<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        archive: P,
        sources: &[Q],
    ) -> Result<OperationResult> {
        let start = Instant::now();
        self.config.validate()?;
        let archive = ArchivePath::new(archive.as_ref())?;
        let (format, backend) = self.backend_for(&archive)?;
        let path = archive.as_path();

        if sources.is_empty() {
            return Err(ArchiverError::compression(path, BackendError::NoSources));
        }
        if let Some(missing) = sources
            .iter()
            .map(AsRef::<Path>::as_ref)
            .find(|source| fs::symlink_metadata(source).is_err())
        {
            return Err(ArchiverError::compression(
                path,
                BackendError::SourceNotFound {
                    path: missing.to_path_buf(),
                },
            ));
        }

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| ArchiverError::compression(path, e))?;

        let entries = collect_sources(sources, &self.config, Some(path))
            .map_err(|e| ArchiverError::compression(path, e))?;

        let mut temp =
            NamedTempFile::new_in(parent).map_err(|e| ArchiverError::compression(path, e))?;
        let output = backend
            .compress(temp.as_file_mut(), &entries, &self.config)
            .map_err(|e| ArchiverError::compression(path, e))?;
        set_archive_permissions(&temp).map_err(|e| ArchiverError::compression(path, e))?;
        temp.persist(path)
            .map_err(|e| ArchiverError::compression(path, e.error))?;

        log::info!(
            "compressed {} entries into {} ({})",
            output.entries.len(),
            archive,
            format
        );

        Ok(OperationResult::compressed(
            format,
            archive.into_path_buf(),
            &output,
            start.elapsed(),
        ))
    }

    /// Lists the entries of `archive` without extracting it.
    ///
    /// # Errors
    ///
    /// - [`ArchiverError::NotFound`] if the suffix matches no format.
    /// - [`ArchiverError::Extraction`] if the archive cannot be read.
    pub fn list<P: AsRef<Path>>(&self, archive: P) -> Result<Vec<ListedEntry>> {
        let archive = ArchivePath::new(archive.as_ref())?;
        let (format, backend) = self.backend_for(&archive)?;
        let path = archive.as_path();

        let entries = backend
            .list(path)
            .map_err(|e| ArchiverError::extraction(path, e))?;
        log::info!("listed {} entries in {} ({})", entries.len(), archive, format);
        Ok(entries)
    }

    fn backend_for(&self, archive: &ArchivePath) -> Result<(ArchiveFormat, &dyn ArchiveBackend)> {
        let format = self.registry.resolve(archive)?;
        let backend = self.backends.get(&format).ok_or_else(|| ArchiverError::NotFound {
            path: archive.as_path().to_path_buf(),
        })?;
        log::debug!("{archive} handled by {} backend", backend.name());
        Ok((format, backend.as_ref()))
    }
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new(ArchiverConfig::default())
    }
}

impl fmt::Debug for Archiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut backends: Vec<_> = self.backends.iter().map(|(k, v)| (*k, v.name())).collect();
        backends.sort_by_key(|(format, _)| format.name());
        f.debug_struct("Archiver")
            .field("registry", &self.registry)
            .field("backends", &backends)
            .field("config", &self.config)
            .finish()
    }
}

/// Gives a finished archive mode 0644.
///
/// Temp files are created owner-only. The fixed mode replaces that and does
/// not take the process umask into account.
#[cfg(unix)]
fn set_archive_permissions(temp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    temp.as_file().set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_archive_permissions(_temp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
