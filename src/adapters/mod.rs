//! Adapter implementations for the [`FileGenerator`](crate::ports::FileGenerator) port.
//!
//! - `raw` — zero-filled bytes, exact size
//! - `image` — solid white PNG/JPEG
//! - `spreadsheet` — one-cell `.xlsx` padded with random hex

pub mod image;
pub mod raw;
pub mod spreadsheet;

use crate::error::GenError;

/// Allocate `len` bytes set to `fill`, failing instead of aborting when the
/// allocator refuses.
pub(crate) fn filled_buffer(len: usize, fill: u8, what: &str) -> Result<Vec<u8>, GenError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| GenError::Encoding(format!("Cannot allocate {len} bytes for {what}: {e}")))?;
    buf.resize(len, fill);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_buffer_has_requested_contents() {
        assert_eq!(filled_buffer(4, 0xFF, "test").unwrap(), vec![0xFF; 4]);
        assert!(filled_buffer(0, 0, "test").unwrap().is_empty());
    }

    #[test]
    fn impossible_allocation_is_an_error() {
        let err = filled_buffer(usize::MAX / 2, 0, "test").unwrap_err();
        assert!(matches!(err, GenError::Encoding(ref msg) if msg.contains("Cannot allocate")));
    }
}
