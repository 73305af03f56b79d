use alloc::string::String;
use enough::StopReason;

/// Errors from PBM/PGM decoding and pixel access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GraymapError {
    #[error("unrecognized format magic line")]
    UnrecognizedFormat,

    #[error("unsupported max value {0} (only 8-bit samples are supported)")]
    UnsupportedMaxValue(u32),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("pixel index {index} out of range for buffer of {len} samples")]
    OutOfRange { index: usize, len: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for GraymapError {
    fn from(r: StopReason) -> Self {
        GraymapError::Cancelled(r)
    }
}
