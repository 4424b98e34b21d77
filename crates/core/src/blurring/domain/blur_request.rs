use crate::shared::pixel_buffer::PixelBuffer;

/// A single blur invocation: the source buffer and the requested strength.
///
/// Strength is signed so out-of-range values from callers reach the engine
/// and are rejected there rather than wrapping.
#[derive(Clone, Copy, Debug)]
pub struct BlurRequest<'a> {
    pub buffer: &'a PixelBuffer,
    pub strength: i32,
}

impl<'a> BlurRequest<'a> {
    pub fn new(buffer: &'a PixelBuffer, strength: i32) -> Self {
        Self { buffer, strength }
    }
}
