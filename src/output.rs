//! Output file naming and destination paths.

use std::path::{Path, PathBuf};

/// Token in a filename template replaced by the 1-based file index.
pub const INDEX_PLACEHOLDER: &str = "{n}";

/// Resolve the filename (without extension) for file `index` of `count`.
///
/// Every `{n}` in the template becomes the index. Without a placeholder,
/// batches of more than one file get `-<index>` appended so names stay unique.
#[must_use]
pub fn resolve_filename(template: &str, index: u32, count: u32) -> String {
    if template.contains(INDEX_PLACEHOLDER) {
        template.replace(INDEX_PLACEHOLDER, &index.to_string())
    } else if count > 1 {
        format!("{template}-{index}")
    } else {
        template.to_string()
    }
}

/// Join the destination directory, resolved filename and extension.
#[must_use]
pub fn resolve_output_path(dir: &Path, filename: &str, extension: &str) -> PathBuf {
    dir.join(format!("{filename}.{extension}"))
}
