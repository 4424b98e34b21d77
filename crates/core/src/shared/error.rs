use thiserror::Error;

/// Failures raised by the blur engine.
///
/// Every variant is fatal to the single call that produced it; the engine
/// keeps no state that a failure could corrupt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlurError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },
    #[error("buffer length {actual} does not match {width}x{height}x{channels} = {expected}")]
    BufferLength {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
    #[error("kernel radius {radius} does not fit an axis of length {axis_len}")]
    DimensionMismatch { radius: usize, axis_len: usize },
    #[error("failed to allocate {bytes} bytes for pixel buffer")]
    Allocation { bytes: usize },
}

impl BlurError {
    pub(crate) fn negative_strength(strength: i32) -> Self {
        BlurError::InvalidParameter {
            name: "strength",
            value: strength as i64,
            reason: "must be >= 0",
        }
    }
}
