//! Unified error type for dummygen.

use thiserror::Error;

/// Errors that can occur while collecting input or generating files.
#[derive(Debug, Error)]
pub enum GenError {
    /// A size string did not match `<number>[B|KB|MB|GB]`.
    #[error("Invalid size '{input}': expected a number with an optional unit (B, KB, MB, GB)")]
    SizeFormat {
        /// The rejected input.
        input: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an image or workbook failed.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
