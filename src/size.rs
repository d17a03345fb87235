//! Human size strings (`"10MB"`, `"1,024 KB"`, `"2.5gb"`) to byte counts and back.

use crate::error::GenError;

const KIB: u64 = 1024;

/// Parse a size string into a byte count.
///
/// Accepts a decimal number (thousands separators allowed) followed by an
/// optional, case-insensitive unit: `B`, `KB`, `MB` or `GB`. A missing unit
/// means bytes. The result is `round(number * multiplier)`.
///
/// # Errors
///
/// Returns [`GenError::SizeFormat`] if the string does not match that shape
/// or the result does not fit in a `u64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn parse_size(input: &str) -> Result<u64, GenError> {
    let invalid = || GenError::SizeFormat { input: input.to_string() };

    let trimmed = input.trim();
    let unit_start = trimmed.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(unit_start);
    let multiplier = unit_multiplier(unit).ok_or_else(invalid)?;

    let number = number.trim_end();
    let well_formed = number.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
        && number.chars().any(|c| c.is_ascii_digit())
        && number.matches('.').count() <= 1;
    if !well_formed {
        return Err(invalid());
    }

    let digits: String = number.chars().filter(|&c| c != ',').collect();
    let value: f64 = digits.parse().map_err(|_| invalid())?;
    let bytes = (value * multiplier as f64).round();

    // 2^64: anything at or above it saturates on the cast.
    if !bytes.is_finite() || bytes >= 18_446_744_073_709_551_616.0 {
        return Err(invalid());
    }
    Ok(bytes as u64)
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    match unit.to_ascii_uppercase().as_str() {
        "" | "B" => Some(1),
        "KB" => Some(KIB),
        "MB" => Some(KIB * KIB),
        "GB" => Some(KIB * KIB * KIB),
        _ => None,
    }
}

/// Render a byte count for console output, e.g. `512 B` or `10.00 MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < KIB {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / KIB as f64;
    let mut unit = 0;
    while value >= KIB as f64 && unit < UNITS.len() - 1 {
        value /= KIB as f64;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
