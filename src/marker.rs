//! Locating the profile data marker in normalized device output.
use crate::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Terminates the hex digit run on the wire (ASCII EOT).
pub const SENTINEL: char = '\x04';

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"LLVM profile data \(length: (?P<len>[0-9]+) bytes, ",
        r"CRC32: (?P<crc>(?:0x)?[0-9a-fA-F]+)\): *",
        r"(?P<data>0x[0-9a-fA-F]+)\x04",
    ))
    .expect("marker pattern")
});

/// Fields announced by the device alongside the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    /// Payload size in bytes, as announced.
    pub declared_length: u64,
    /// CRC-32 of the payload, as announced.
    pub declared_checksum: u32,
    /// Hex digit run including its `0x` prefix; the sentinel is not kept.
    pub hex_payload: String,
}

/// Find the first marker in `text`. Expects already normalized text, see
/// [`crate::framing::normalize`].
pub fn find_marker(text: &str) -> Result<MarkerRecord, ExtractError> {
    let caps = MARKER.captures(text).ok_or(ExtractError::MarkerNotFound)?;
    let len = &caps["len"];
    let crc = &caps["crc"];

    let declared_length = len.parse::<u64>().map_err(|_| ExtractError::MalformedField {
        field: "length",
        value: len.to_string(),
    })?;
    let crc_digits = crc.strip_prefix("0x").unwrap_or(crc);
    let declared_checksum =
        u32::from_str_radix(crc_digits, 16).map_err(|_| ExtractError::MalformedField {
            field: "CRC32",
            value: crc.to_string(),
        })?;

    Ok(MarkerRecord {
        declared_length,
        declared_checksum,
        hex_payload: caps["data"].to_string(),
    })
}
