//! LLVM profile data extraction from device output.
//!
//! Firmware built with coverage instrumentation dumps its raw profile over
//! the console as one marker line:
//!
//! ```text
//! LLVM profile data (length: 4 bytes, CRC32: 0xb63cfbcd): 0x04030201<EOT>
//! ```
//!
//! This crate recovers those bytes from a noisy serial capture:
//!
//! - `decode`: lenient bytes-to-text decoding with an explicit policy
//! - `framing`: log prefix stripping and line ending removal
//! - `marker`: locating the marker and parsing its fields
//! - `payload`: hex decoding, length and CRC-32 validation, and the inverse
//!   [`build_marker`] used to produce device-style captures
//!
//! The binaries (`src/main.rs` and `src/bin/emit_marker.rs`) wrap these
//! modules with file and stdio handling. The extracted `.profraw` still has
//! to be indexed with `llvm-profdata merge` before `llvm-cov` can use it.
pub mod decode;
pub mod error;
pub mod framing;
pub mod marker;
pub mod payload;

pub use error::ExtractError;
pub use payload::{build_marker, extract};
