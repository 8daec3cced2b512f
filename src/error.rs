use thiserror::Error;

/// Reasons an extraction can fail. All of them are terminal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("could not detect LLVM profile data in device output")]
    MarkerNotFound,

    /// A marker field matched the pattern but does not fit its integer type.
    #[error("malformed {field} field in marker: {value:?}")]
    MalformedField { field: &'static str, value: String },

    /// An odd digit run whose leading digit would not fit the byte width.
    #[error("hex payload of {digits} digits overflows its byte width")]
    PayloadOverflow { digits: usize },

    #[error("length check failed! expected: {expected}, actual: {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    #[error("checksum check failed! expected: {expected:#010x}, actual: {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}
