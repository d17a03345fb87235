//! File generator port: write one dummy file to disk.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::GenError;
use crate::request::ImageDimensions;

/// One file to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    /// Full destination path, including the extension.
    pub path: PathBuf,
    /// Extension without a leading dot.
    pub extension: String,
    /// Requested size in bytes.
    pub size_bytes: u64,
    /// Pixel dimensions, set for image targets.
    pub dimensions: Option<ImageDimensions>,
}

/// Boxed future type returned by [`FileGenerator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<(), GenError>> + Send + 'a>>;

/// Writes a single placeholder file.
pub trait FileGenerator: Send + Sync {
    /// Create (or truncate) `target.path` and fill it.
    fn generate(&self, target: &FileTarget) -> GenerateFuture<'_>;
}
