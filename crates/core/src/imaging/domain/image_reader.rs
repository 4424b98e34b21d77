use std::path::Path;

use crate::imaging::domain::image_io_error::ImageIoError;
use crate::shared::pixel_buffer::PixelBuffer;

/// Decodes an image file into a [`PixelBuffer`].
///
/// Implementations own the container and codec details; the engine only
/// sees raw samples.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<PixelBuffer, ImageIoError>;
}
