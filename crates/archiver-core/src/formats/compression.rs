//! Stream codecs wrapped around tar archives and compression level mapping.
//!
//! Levels use a single 1-9 scale everywhere:
//!
//! - **1-3**: fast compression
//! - **6**: default
//! - **7-9**: best compression
//!
//! Each codec maps this scale onto its own level type.

/// Compression codec applied to a tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm), `.tar.gz`.
    Gzip,
    /// Bzip2 compression (Burrows-Wheeler algorithm), `.tar.bz2`.
    Bzip2,
}

impl CompressionCodec {
    /// Returns the typical file extension for this codec when used with tar.
    ///
    /// # Examples
    ///
    /// ```
    /// use archiver_core::formats::compression::CompressionCodec;
    ///
    /// assert_eq!(CompressionCodec::Gzip.extension(), "tar.gz");
    /// assert_eq!(CompressionCodec::Bzip2.extension(), "tar.bz2");
    /// ```
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "tar.gz",
            Self::Bzip2 => "tar.bz2",
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
        }
    }
}

/// Converts a 1-9 level to a flate2 compression level.
///
/// # Examples
///
/// ```
/// use archiver_core::formats::compression::compression_level_to_flate2;
///
/// assert_eq!(compression_level_to_flate2(Some(1)), flate2::Compression::fast());
/// assert_eq!(compression_level_to_flate2(None), flate2::Compression::default());
/// ```
#[must_use]
pub fn compression_level_to_flate2(level: Option<u8>) -> flate2::Compression {
    match level {
        None | Some(6) => flate2::Compression::default(),
        Some(1..=3) => flate2::Compression::fast(),
        Some(7..=9) => flate2::Compression::best(),
        Some(n) => flate2::Compression::new(u32::from(n.min(9))),
    }
}

/// Converts a 1-9 level to a bzip2 compression level.
#[must_use]
pub fn compression_level_to_bzip2(level: Option<u8>) -> bzip2::Compression {
    match level {
        None | Some(6) => bzip2::Compression::default(),
        Some(1) => bzip2::Compression::fast(),
        Some(7..=9) => bzip2::Compression::best(),
        Some(n) => bzip2::Compression::new(u32::from(n.clamp(1, 9))),
    }
}

/// Converts a 1-9 level to the deflate level passed to the zip writer.
#[must_use]
pub fn compression_level_to_zip(level: Option<u8>) -> i64 {
    i64::from(level.unwrap_or(6).clamp(1, 9))
}
