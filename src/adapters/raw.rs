//! Zero-filled file writer for extensions with no dedicated generator.

use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::GenError;
use crate::ports::{FileGenerator, FileTarget, GenerateFuture};

/// Default chunk size for zero-fill writes (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Writes exactly `size_bytes` zero bytes in bounded chunks.
pub struct RawFileGenerator {
    chunk_size: usize,
}

impl RawFileGenerator {
    /// Create a writer that never holds more than `chunk_size` bytes in memory.
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size: chunk_size.max(1) }
    }
}

impl Default for RawFileGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl FileGenerator for RawFileGenerator {
    fn generate(&self, target: &FileTarget) -> GenerateFuture<'_> {
        let target = target.clone();
        Box::pin(async move { write_zeros(&target.path, target.size_bytes, self.chunk_size).await })
    }
}

/// Stream `size` zero bytes to `path`, truncating the last chunk to the remainder.
///
/// Each chunk is awaited before the next is issued, so a slow destination
/// holds the loop instead of queueing buffers.
///
/// # Errors
///
/// Returns an error if the file cannot be created or any write fails.
pub async fn write_zeros(path: &Path, size: u64, chunk_size: usize) -> Result<(), GenError> {
    let mut file = File::create(path).await?;

    let buffer_len = usize::try_from(size).map_or(chunk_size, |s| s.min(chunk_size));
    let zeros = vec![0u8; buffer_len];

    let mut remaining = size;
    let mut chunks = 0u64;
    while remaining > 0 {
        let len = usize::try_from(remaining).map_or(zeros.len(), |r| r.min(zeros.len()));
        file.write_all(&zeros[..len]).await?;
        remaining -= len as u64;
        chunks += 1;
    }
    file.flush().await?;

    log::debug!("Wrote {size} zero bytes to {} in {chunks} chunk(s)", path.display());
    Ok(())
}
