//! Solid white PNG/JPEG generator.
//!
//! Output size follows from the codec, not from the requested byte count.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

use super::filled_buffer;
use crate::error::GenError;
use crate::ports::{FileGenerator, FileTarget, GenerateFuture};
use crate::request::{FileKind, ImageDimensions, ImageKind};

/// Fixed JPEG quality.
pub const JPEG_QUALITY: u8 = 90;

/// Encodes an opaque white raster of the target's dimensions.
#[derive(Debug, Default)]
pub struct ImageFileGenerator;

impl FileGenerator for ImageFileGenerator {
    fn generate(&self, target: &FileTarget) -> GenerateFuture<'_> {
        Box::pin(write_image(target.clone()))
    }
}

async fn write_image(target: FileTarget) -> Result<(), GenError> {
    let FileKind::Image(kind) = FileKind::from_extension(&target.extension) else {
        return Err(GenError::InvalidArgument(format!(
            "'{}' is not an image extension",
            target.extension
        )));
    };
    let dimensions = target
        .dimensions
        .ok_or_else(|| GenError::InvalidArgument("Image width and height are required".into()))?;

    let data = tokio::task::spawn_blocking(move || encode_white(kind, dimensions))
        .await
        .map_err(|e| GenError::Encoding(format!("Image encoder task failed: {e}")))??;

    tokio::fs::write(&target.path, &data).await?;
    log::debug!(
        "Encoded {}x{} {kind:?} image ({} bytes) to {}",
        dimensions.width,
        dimensions.height,
        data.len(),
        target.path.display()
    );
    Ok(())
}

/// Encode a `width` x `height` all-white image in memory.
///
/// # Errors
///
/// Returns an error if the dimensions are zero, the pixel buffer would not
/// fit in memory, or the codec rejects the image.
pub fn encode_white(kind: ImageKind, dimensions: ImageDimensions) -> Result<Vec<u8>, GenError> {
    let ImageDimensions { width, height } = dimensions;
    if width == 0 || height == 0 {
        return Err(GenError::InvalidArgument(format!(
            "Image dimensions must be positive, got {width}x{height}"
        )));
    }
    let len = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|pixels| pixels.checked_mul(3))
        .and_then(|bytes| usize::try_from(bytes).ok())
        .ok_or_else(|| GenError::Encoding(format!("Image {width}x{height} is too large")))?;

    let pixels = filled_buffer(len, u8::MAX, "pixel buffer")?;
    let img = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| GenError::Encoding(format!("Pixel buffer for {width}x{height} is short")))?;
    let mut buf = Cursor::new(Vec::new());
    match kind {
        ImageKind::Png => img.write_to(&mut buf, ImageFormat::Png),
        ImageKind::Jpeg => JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY).encode_image(&img),
    }
    .map_err(|e| GenError::Encoding(format!("Failed to encode {kind:?}: {e}")))?;

    Ok(buf.into_inner())
}
