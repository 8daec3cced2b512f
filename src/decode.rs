//! Lenient bytes-to-text decoding for serial captures.
//!
//! The transport is not guaranteed to be clean ASCII, so decoding never
//! fails. The marker itself is pure ASCII, which means both policies yield
//! the same extraction result for a well-formed capture.
use clap::ValueEnum;

/// How bytes that are not plain ASCII are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DecodePolicy {
    /// Silently drop every byte >= 0x80.
    #[default]
    Drop,
    /// Map every byte to the code point of the same value.
    Latin1,
}

/// Decode a raw capture into text according to `policy`.
pub fn decode_capture(bytes: &[u8], policy: DecodePolicy) -> String {
    match policy {
        DecodePolicy::Drop => bytes
            .iter()
            .filter(|b| b.is_ascii())
            .map(|&b| b as char)
            .collect(),
        DecodePolicy::Latin1 => bytes.iter().map(|&b| b as char).collect(),
    }
}
