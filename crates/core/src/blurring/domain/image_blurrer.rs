use crate::blurring::domain::blur_request::BlurRequest;
use crate::shared::error::BlurError;
use crate::shared::pixel_buffer::PixelBuffer;

/// Domain interface for producing a blurred copy of a pixel buffer.
///
/// Implementations never modify the source; the result has the same
/// dimensions and channel layout.
pub trait ImageBlurrer: Send {
    fn blur(&self, request: BlurRequest<'_>) -> Result<PixelBuffer, BlurError>;
}
