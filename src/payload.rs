//! Payload decoding and validation.
//!
//! The device prints the payload as one big hexadecimal integer whose
//! little-endian byte representation is the raw profile. [`extract`] turns a
//! whole device capture back into those bytes and refuses to return anything
//! whose length or CRC-32 disagrees with what the device announced.
use crate::error::ExtractError;
use crate::framing;
use crate::marker::{self, MarkerRecord, SENTINEL};
use log::debug;

/// Convert the `0x`-prefixed digit run of a marker into payload bytes.
///
/// The run is read as an unsigned integer and re-encoded little-endian into
/// `len(run) / 2 - 1` bytes (the `0x` accounts for the `- 1`). An odd digit
/// count only fits when the extra leading digit is zero.
pub fn decode_hex_payload(hex_payload: &str) -> Result<Vec<u8>, ExtractError> {
    let mut digits = hex_payload.strip_prefix("0x").unwrap_or(hex_payload);
    if digits.len() % 2 == 1 {
        match digits.strip_prefix('0') {
            Some(rest) => digits = rest,
            None => return Err(ExtractError::PayloadOverflow { digits: digits.len() }),
        }
    }
    let mut bytes = hex::decode(digits).map_err(|_| ExtractError::MalformedField {
        field: "payload",
        value: hex_payload.to_string(),
    })?;
    bytes.reverse();
    Ok(bytes)
}

/// Check decoded bytes against the announced length and checksum.
pub fn validate(record: &MarkerRecord, bytes: &[u8]) -> Result<(), ExtractError> {
    let actual = bytes.len() as u64;
    if actual != record.declared_length {
        return Err(ExtractError::LengthMismatch {
            expected: record.declared_length,
            actual,
        });
    }
    let actual = crc32fast::hash(bytes);
    if actual != record.declared_checksum {
        return Err(ExtractError::ChecksumMismatch {
            expected: record.declared_checksum,
            actual,
        });
    }
    Ok(())
}

/// Extract the profile payload from a decoded device capture.
pub fn extract(raw_text: &str) -> Result<Vec<u8>, ExtractError> {
    let text = framing::normalize(raw_text);
    let record = marker::find_marker(&text)?;
    debug!(
        "marker: length={} crc={:#010x} digits={}",
        record.declared_length,
        record.declared_checksum,
        record.hex_payload.len().saturating_sub(2)
    );
    let bytes = decode_hex_payload(&record.hex_payload)?;
    validate(&record, &bytes)?;
    debug!("payload validated ({} bytes)", bytes.len());
    Ok(bytes)
}

/// Render `payload` the way the device prints it, sentinel included.
///
/// `payload` must be non-empty for the result to be extractable.
pub fn build_marker(payload: &[u8]) -> String {
    let reversed: Vec<u8> = payload.iter().rev().copied().collect();
    format!(
        "LLVM profile data (length: {} bytes, CRC32: {:#010x}): 0x{}{}",
        payload.len(),
        crc32fast::hash(payload),
        hex::encode(reversed),
        SENTINEL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn hex_run_is_little_endian() {
        assert_eq!(decode_hex_payload("0x04030201").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn leading_zero_digits_become_trailing_zero_bytes() {
        assert_eq!(decode_hex_payload("0x000201").unwrap(), vec![1, 2, 0]);
    }

    #[test]
    fn odd_digit_count_with_zero_lead_fits() {
        assert_eq!(decode_hex_payload("0x0201").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex_payload("0x00201").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex_payload("0x0").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn odd_digit_count_with_nonzero_lead_overflows() {
        assert_eq!(
            decode_hex_payload("0x10201"),
            Err(ExtractError::PayloadOverflow { digits: 5 })
        );
    }

    #[test]
    fn uppercase_digits_decode() {
        assert_eq!(decode_hex_payload("0xBEEF").unwrap(), vec![0xef, 0xbe]);
    }

    #[test]
    fn round_trip_single_zero_byte() {
        assert_eq!(extract(&build_marker(&[0])).unwrap(), vec![0]);
    }

    #[test]
    fn round_trip_various_lengths() {
        for len in [1usize, 2, 3, 16, 255, 256, 300, 4096] {
            let p = sample(len);
            assert_eq!(extract(&build_marker(&p)).unwrap(), p, "len {len}");
        }
    }

    #[test]
    fn trailing_zero_bytes_survive() {
        let p = vec![9, 0, 0, 0];
        assert_eq!(extract(&build_marker(&p)).unwrap(), p);
    }

    #[test]
    fn device_capture_with_prefix() {
        let p = vec![1u8, 2, 3, 4];
        let crc = crc32fast::hash(&p);
        let input = format!(
            "[00:00:01] LLVM profile data (length: 4 bytes, CRC32: {crc:#x}): 0x04030201\x04\n"
        );
        assert_eq!(extract(&input).unwrap(), p);
    }

    #[test]
    fn noise_does_not_change_result() {
        let p = sample(40);
        let marker = build_marker(&p);
        // Wrap the marker every 17 characters as a terminal would, with a log
        // prefix on each line, surrounded by unrelated output.
        let chars: Vec<char> = marker.chars().collect();
        let mut input = String::from("boot rom v1\r\n[00:00:00.100] starting test\r\n");
        for chunk in chars.chunks(17) {
            input.push_str("I00003 coverage.c:42] ");
            input.extend(chunk);
            input.push_str("\r\n");
        }
        input.push_str("PASS!\n");
        assert_eq!(extract(&input).unwrap(), p);
    }

    #[test]
    fn length_mismatch_reports_both_values() {
        let crc = crc32fast::hash(&[1, 2, 3, 4]);
        let input = format!("LLVM profile data (length: 5 bytes, CRC32: {crc:#x}): 0x04030201\x04");
        assert_eq!(
            extract(&input),
            Err(ExtractError::LengthMismatch { expected: 5, actual: 4 })
        );
    }

    #[test]
    fn checksum_mismatch_reports_both_values() {
        let crc = crc32fast::hash(&[1, 2, 3, 4]);
        let input = format!(
            "LLVM profile data (length: 4 bytes, CRC32: {:#x}): 0x04030201\x04",
            crc ^ 1
        );
        assert_eq!(
            extract(&input),
            Err(ExtractError::ChecksumMismatch { expected: crc ^ 1, actual: crc })
        );
    }

    #[test]
    fn missing_marker() {
        assert_eq!(
            extract("[00:00:01] test finished\n"),
            Err(ExtractError::MarkerNotFound)
        );
    }
}
