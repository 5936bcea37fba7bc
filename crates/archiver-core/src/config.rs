//! Configuration shared by extraction and compression.

use crate::ArchiverError;
use crate::Result;

/// Default compression level on the 1-9 scale.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Options applied by every backend adapter.
///
/// # Examples
///
/// ```
/// use archiver_core::ArchiverConfig;
///
/// let config = ArchiverConfig::default()
///     .with_compression_level(9)
///     .with_follow_symlinks(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiverConfig {
    /// Compression level (1-9) for compressed formats.
    ///
    /// `None` uses the codec's own default. Ignored for plain tar.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Archive the files symlinks point to instead of the links themselves.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,

    /// Store and restore Unix permission bits.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
            follow_symlinks: false,
            preserve_permissions: true,
        }
    }
}

impl ArchiverConfig {
    /// Creates a new `ArchiverConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to follow symlinks while compressing.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiverError::InvalidCompressionLevel`] if a level is set
    /// outside 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArchiverError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
