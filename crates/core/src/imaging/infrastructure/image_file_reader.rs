use std::path::Path;

use crate::imaging::domain::image_io_error::ImageIoError;
use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::pixel_buffer::PixelBuffer;

/// Decodes image files with the `image` crate.
///
/// Sources with an alpha channel decode to RGBA (4 channels); everything
/// else, including grayscale, decodes to RGB (3 channels).
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<PixelBuffer, ImageIoError> {
        let img = image::open(path).map_err(|source| ImageIoError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = (img.width(), img.height());
        let buffer = if img.color().has_alpha() {
            PixelBuffer::new(img.to_rgba8().into_raw(), width, height, 4)?
        } else {
            PixelBuffer::new(img.to_rgb8().into_raw(), width, height, 3)?
        };
        log::debug!(
            "Decoded {} ({}x{}, {} channels)",
            path.display(),
            width,
            height,
            buffer.channels()
        );
        Ok(buffer)
    }
}
