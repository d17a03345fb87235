//! The generation request and the file kinds it dispatches on.

use crate::error::GenError;

/// Raster encodings the image generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Lossless PNG.
    Png,
    /// JPEG at a fixed quality.
    Jpeg,
}

/// Which generator handles an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Zero-filled bytes of the exact requested length.
    Raw,
    /// Solid white raster image.
    Image(ImageKind),
    /// Single-cell workbook padded with random hex.
    Spreadsheet,
}

impl FileKind {
    /// Classify an extension, case-insensitively. Unknown extensions are raw.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Image(ImageKind::Png),
            "jpg" | "jpeg" => Self::Image(ImageKind::Jpeg),
            "xlsx" => Self::Spreadsheet,
            _ => Self::Raw,
        }
    }

    /// Whether this kind needs width and height.
    #[must_use]
    pub fn is_image(self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// Pixel dimensions of a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    /// Width in pixels, at least 1.
    pub width: u32,
    /// Height in pixels, at least 1.
    pub height: u32,
}

/// Everything needed to generate one batch of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Extension without a leading dot, as typed by the user.
    pub extension: String,
    /// Target size in bytes (ignored for images).
    pub size_bytes: u64,
    /// Filename template, may contain `{n}`.
    pub filename_template: String,
    /// Number of files, at least 1.
    pub count: u32,
    /// Present exactly when the extension is an image.
    pub image_dimensions: Option<ImageDimensions>,
}

impl GenerationRequest {
    /// The generator kind for this request's extension.
    #[must_use]
    pub fn kind(&self) -> FileKind {
        FileKind::from_extension(&self.extension)
    }
}

/// Trim whitespace and leading dots from an extension and reject anything
/// that could escape the output directory.
///
/// # Errors
///
/// Returns an error if the result is empty or contains a path separator.
pub fn normalize_extension(input: &str) -> Result<String, GenError> {
    let ext = input.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err(GenError::InvalidArgument("Extension must not be empty".into()));
    }
    if ext.contains(['/', '\\']) || ext.contains(char::is_whitespace) {
        return Err(GenError::InvalidArgument(format!("Invalid extension '{ext}'")));
    }
    Ok(ext.to_string())
}

/// Validate a filename template.
///
/// # Errors
///
/// Returns an error if the template is blank or contains a path separator.
pub fn validate_template(input: &str) -> Result<String, GenError> {
    let template = input.trim();
    if template.is_empty() {
        return Err(GenError::InvalidArgument("Filename must not be empty".into()));
    }
    if template.contains(['/', '\\']) {
        return Err(GenError::InvalidArgument(format!(
            "Filename '{template}' must not contain path separators"
        )));
    }
    Ok(template.to_string())
}
