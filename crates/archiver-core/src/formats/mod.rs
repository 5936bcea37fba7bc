//! Format registry and backend adapters.

pub mod compression;
pub mod registry;
pub mod tar;
pub mod traits;
pub mod zip;

pub use compression::CompressionCodec;
pub use registry::FormatPattern;
pub use registry::FormatRegistry;
pub use tar::TarBackend;
pub use traits::ArchiveBackend;
pub use traits::BackendOutput;
pub use zip::ZipBackend;
