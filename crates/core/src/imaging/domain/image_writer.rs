use std::path::Path;

use crate::imaging::domain::image_io_error::ImageIoError;
use crate::shared::pixel_buffer::PixelBuffer;

/// Encodes a [`PixelBuffer`] to an image file.
pub trait ImageWriter: Send {
    /// Writes `buffer` to `path`, choosing the format from the extension.
    fn write(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), ImageIoError>;
}
