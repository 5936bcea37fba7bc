//! Supported archive formats.

use crate::formats::compression::CompressionCodec;
use std::fmt;

/// Archive formats the built-in backends understand.
///
/// Values are produced by [`FormatRegistry::resolve`](crate::FormatRegistry::resolve)
/// from the archive's file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
    /// ZIP archive.
    Zip,
}

impl ArchiveFormat {
    /// Every supported format, in registry order.
    pub const ALL: [Self; 4] = [Self::Tar, Self::TarGz, Self::TarBz2, Self::Zip];

    /// Returns the short name of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use archiver_core::ArchiveFormat;
    ///
    /// assert_eq!(ArchiveFormat::TarBz2.name(), "tar.bz2");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
            Self::Zip => "zip",
        }
    }

    /// Returns the canonical file suffix, including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Tar => ".tar",
            Self::TarGz => ".tar.gz",
            Self::TarBz2 => ".tar.bz2",
            Self::Zip => ".zip",
        }
    }

    /// Returns the stream codec wrapped around the tar stream, if any.
    #[must_use]
    pub const fn codec(self) -> Option<CompressionCodec> {
        match self {
            Self::TarGz => Some(CompressionCodec::Gzip),
            Self::TarBz2 => Some(CompressionCodec::Bzip2),
            Self::Tar | Self::Zip => None,
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
