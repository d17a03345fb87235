//! Generator set that bundles the port implementations by file kind.

use crate::adapters::image::ImageFileGenerator;
use crate::adapters::raw::RawFileGenerator;
use crate::adapters::spreadsheet::SpreadsheetFileGenerator;
use crate::config::Config;
use crate::error::GenError;
use crate::ports::FileGenerator;
use crate::request::FileKind;

/// One generator per [`FileKind`].
pub struct GeneratorSet {
    /// Fallback for any extension without a dedicated generator.
    pub raw: Box<dyn FileGenerator>,
    /// PNG and JPEG.
    pub image: Box<dyn FileGenerator>,
    /// `.xlsx`.
    pub spreadsheet: Box<dyn FileGenerator>,
}

impl GeneratorSet {
    /// Build the real generators, using the configured chunk size for raw files.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured chunk size is invalid.
    pub fn live(config: &Config) -> Result<Self, GenError> {
        let chunk_size = config.chunk_size().map_err(GenError::Config)?;
        Ok(Self {
            raw: Box::new(RawFileGenerator::new(chunk_size)),
            image: Box::new(ImageFileGenerator),
            spreadsheet: Box::new(SpreadsheetFileGenerator),
        })
    }

    /// The generator responsible for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: FileKind) -> &dyn FileGenerator {
        match kind {
            FileKind::Raw => self.raw.as_ref(),
            FileKind::Image(_) => self.image.as_ref(),
            FileKind::Spreadsheet => self.spreadsheet.as_ref(),
        }
    }
}
