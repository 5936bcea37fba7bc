//! Extension-to-format lookup.

use crate::ArchiverError;
use crate::Result;
use crate::types::ArchiveFormat;
use crate::types::ArchivePath;

/// Built-in suffix table. Multi-part suffixes precede the single-part ones
/// they end with.
const DEFAULT_PATTERNS: &[(&str, ArchiveFormat)] = &[
    (".tar.bz2", ArchiveFormat::TarBz2),
    (".tar.gz", ArchiveFormat::TarGz),
    (".tbz2", ArchiveFormat::TarBz2),
    (".tgz", ArchiveFormat::TarGz),
    (".tbz", ArchiveFormat::TarBz2),
    (".tar", ArchiveFormat::Tar),
    (".zip", ArchiveFormat::Zip),
];

/// A file-name suffix mapped to an archive format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPattern {
    suffix: String,
    format: ArchiveFormat,
}

impl FormatPattern {
    /// Returns the lowercase suffix, including the leading dot.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the format the suffix resolves to.
    #[must_use]
    pub const fn format(&self) -> ArchiveFormat {
        self.format
    }
}

/// Priority-ordered table of file-name suffixes.
///
/// Lookups compare the final path component case-insensitively against each
/// suffix, longest first, so `test.tar.gz` is a [`ArchiveFormat::TarGz`] and
/// never a plain tar.
///
/// # Examples
///
/// ```
/// use archiver_core::ArchiveFormat;
/// use archiver_core::ArchivePath;
/// use archiver_core::FormatRegistry;
///
/// let registry = FormatRegistry::with_defaults();
/// let path = ArchivePath::new("test.tar.gz").unwrap();
/// assert_eq!(registry.resolve(&path).unwrap(), ArchiveFormat::TarGz);
///
/// let unknown = ArchivePath::new("test.unknown").unwrap();
/// assert!(registry.resolve(&unknown).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    patterns: Vec<FormatPattern>,
}

impl FormatRegistry {
    /// Creates an empty registry that resolves nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in tar, tar.gz, tar.bz2 and zip
    /// suffixes.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (suffix, format) in DEFAULT_PATTERNS {
            registry.register(suffix, *format);
        }
        registry
    }

    /// Registers `suffix` for `format`.
    ///
    /// A missing leading dot is added. Re-registering an existing suffix
    /// replaces its format. Longer suffixes keep priority over shorter ones;
    /// equal lengths keep registration order.
    pub fn register(&mut self, suffix: &str, format: ArchiveFormat) {
        let mut suffix = suffix.to_ascii_lowercase();
        if !suffix.starts_with('.') {
            suffix.insert(0, '.');
        }

        if let Some(existing) = self.patterns.iter_mut().find(|p| p.suffix == suffix) {
            existing.format = format;
            return;
        }

        let position = self
            .patterns
            .iter()
            .position(|p| p.suffix.len() < suffix.len())
            .unwrap_or(self.patterns.len());
        self.patterns.insert(position, FormatPattern { suffix, format });
    }

    /// Returns the patterns in match order.
    #[must_use]
    pub fn patterns(&self) -> &[FormatPattern] {
        &self.patterns
    }

    /// Resolves the format of `path` from its file name.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::NotFound`] carrying the path when no suffix
    /// matches. There is no fallback format.
    pub fn resolve(&self, path: &ArchivePath) -> Result<ArchiveFormat> {
        let not_found = || ArchiverError::NotFound {
            path: path.as_path().to_path_buf(),
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_ascii_lowercase())
            .ok_or_else(not_found)?;

        self.patterns
            .iter()
            .find(|p| file_name.len() > p.suffix.len() && file_name.ends_with(&p.suffix))
            .map(|p| {
                log::debug!("resolved {path} as {} via '{}'", p.format, p.suffix);
                p.format
            })
            .ok_or_else(not_found)
    }
}
