//! Single-cell `.xlsx` generator.
//!
//! The workbook holds one sheet whose A1 cell is a random hex string of
//! `2 * size_bytes` characters. The package is deflated, so the file on disk
//! ends up near (usually below) the requested size rather than equal to it.

use std::io::{BufWriter, Seek, Write};

use rand::rngs::OsRng;
use rand::RngCore;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::filled_buffer;
use crate::error::GenError;
use crate::ports::{FileGenerator, FileTarget, GenerateFuture};

/// Name of the only worksheet.
pub const SHEET_NAME: &str = "Sheet1";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

const SHEET_PREFIX: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>"#;

const SHEET_SUFFIX: &str = "</t></is></c></row></sheetData></worksheet>";

/// Writes a workbook padded with random hex content.
#[derive(Debug, Default)]
pub struct SpreadsheetFileGenerator;

impl FileGenerator for SpreadsheetFileGenerator {
    fn generate(&self, target: &FileTarget) -> GenerateFuture<'_> {
        Box::pin(write_workbook(target.clone()))
    }
}

async fn write_workbook(target: FileTarget) -> Result<(), GenError> {
    let size = target.size_bytes;
    let path = target.path.clone();
    let packed = tokio::task::spawn_blocking(move || {
        let content = random_hex(size)?;
        let file = std::fs::File::create(&path)?;
        let file = build_workbook(BufWriter::new(file), &content)?;
        let file = file.into_inner().map_err(|e| GenError::Io(e.into_error()))?;
        Ok::<_, GenError>(file.metadata()?.len())
    })
    .await
    .map_err(|e| GenError::Encoding(format!("Workbook encoder task failed: {e}")))??;

    log::debug!(
        "Wrote workbook with {} hex chars ({packed} bytes packed) to {}",
        size.saturating_mul(2),
        target.path.display()
    );
    Ok(())
}

/// `len` bytes from the OS RNG, hex encoded (`2 * len` lowercase characters).
///
/// # Errors
///
/// Returns an error if the buffers cannot be allocated or the OS RNG fails.
pub fn random_hex(len: u64) -> Result<String, GenError> {
    let len = usize::try_from(len)
        .ok()
        .filter(|n| n.checked_mul(2).is_some())
        .ok_or_else(|| GenError::InvalidArgument(format!("Size {len} is too large for a cell")))?;

    let mut bytes = filled_buffer(len, 0, "random content")?;
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| GenError::Encoding(format!("Random source failed: {e}")))?;
    hex_encode(&bytes)
}

fn hex_encode(bytes: &[u8]) -> Result<String, GenError> {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let len = bytes.len() * 2;
    let mut out = String::new();
    out.try_reserve_exact(len)
        .map_err(|e| GenError::Encoding(format!("Cannot allocate {len} bytes for hex: {e}")))?;
    for &b in bytes {
        out.push(char::from(DIGITS[usize::from(b >> 4)]));
        out.push(char::from(DIGITS[usize::from(b & 0x0f)]));
    }
    Ok(out)
}

/// Package a one-sheet workbook with `content` as an inline string in A1.
///
/// The sheet part is streamed into the archive around `content`, so the cell
/// text is never copied. `content` is written unescaped and must not contain
/// XML markup.
///
/// # Errors
///
/// Returns an error if the zip container cannot be written.
pub fn build_workbook<W: Write + Seek>(writer: W, content: &str) -> Result<W, GenError> {
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{SHEET_NAME}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
    );

    let small = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
    ] {
        zip.start_file(name, small).map_err(zip_error)?;
        zip.write_all(body.as_bytes())?;
    }

    let sheet_len = SHEET_PREFIX.len() + content.len() + SHEET_SUFFIX.len();
    let sheet = small.large_file(u32::try_from(sheet_len).is_err());
    zip.start_file("xl/worksheets/sheet1.xml", sheet).map_err(zip_error)?;
    for part in [SHEET_PREFIX, content, SHEET_SUFFIX] {
        zip.write_all(part.as_bytes())?;
    }

    zip.finish().map_err(zip_error)
}

fn zip_error(e: zip::result::ZipError) -> GenError {
    GenError::Encoding(format!("Failed to write workbook: {e}"))
}
