use std::path::Path;

use image::{DynamicImage, ImageBuffer};

use crate::imaging::domain::image_io_error::ImageIoError;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::constants::{has_extension, OUTPUT_EXTENSIONS};
use crate::shared::error::BlurError;
use crate::shared::pixel_buffer::PixelBuffer;

/// Encodes buffers to PNG or JPEG using the `image` crate.
///
/// JPEG has no alpha channel, so alpha is dropped when the target is
/// `.jpg`/`.jpeg`.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_dynamic_image(buffer: &PixelBuffer) -> Result<DynamicImage, ImageIoError> {
    let (w, h) = (buffer.width(), buffer.height());
    let raw = buffer.data().to_vec();
    let img = match buffer.channels() {
        1 => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageLumaA8),
        3 => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        _ => ImageBuffer::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
    };
    img.ok_or_else(|| {
        ImageIoError::Blur(BlurError::BufferLength {
            width: w,
            height: h,
            channels: buffer.channels(),
            expected: w as usize * h as usize * buffer.channels() as usize,
            actual: buffer.data().len(),
        })
    })
}

fn is_jpeg(path: &Path) -> bool {
    has_extension(path, &["jpg", "jpeg"])
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, buffer: &PixelBuffer) -> Result<(), ImageIoError> {
        if !has_extension(path, OUTPUT_EXTENSIONS) {
            return Err(ImageIoError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }

        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ImageIoError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut img = to_dynamic_image(buffer)?;
        if is_jpeg(path) && img.color().has_alpha() {
            img = match buffer.channels() {
                2 => DynamicImage::ImageLuma8(img.to_luma8()),
                _ => DynamicImage::ImageRgb8(img.to_rgb8()),
            };
        }

        img.save(path).map_err(|source| ImageIoError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Encoded {}x{} to {}", buffer.width(), buffer.height(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn make_buffer(width: u32, height: u32, pixel: &[u8]) -> PixelBuffer {
        let data = pixel.repeat((width * height) as usize);
        PixelBuffer::new(data, width, height, pixel.len() as u8).unwrap()
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &make_buffer(100, 80, &[50, 100, 200]))
            .unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &make_buffer(50, 50, &[50, 100, 200, 255]))
            .unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 50);
        assert_eq!(img.height(), 50);
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 200, 255]);
    }

    #[rstest]
    #[case::gray(&[10])]
    #[case::gray_alpha(&[10, 20])]
    #[case::rgb(&[10, 20, 30])]
    #[case::rgba(&[10, 20, 30, 40])]
    fn test_every_channel_count_encodes_png(#[case] pixel: &[u8]) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &make_buffer(4, 3, pixel))
            .unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        ImageFileWriter::new()
            .write(&path, &make_buffer(16, 16, &[128, 128, 128, 10]))
            .unwrap();

        let img = image::open(&path).unwrap();
        assert!(!img.color().has_alpha());
        assert_eq!((img.width(), img.height()), (16, 16));
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.png");
        ImageFileWriter::new()
            .write(&path, &make_buffer(2, 2, &[0, 0, 0]))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.webp");
        let result = ImageFileWriter::new().write(&path, &make_buffer(2, 2, &[0, 0, 0]));
        assert!(matches!(result, Err(ImageIoError::UnsupportedFormat { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_parent_is_a_file_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let result = ImageFileWriter::new().write(
            &blocker.join("out.png"),
            &make_buffer(2, 2, &[0, 0, 0]),
        );
        assert!(matches!(result, Err(ImageIoError::CreateDir { .. })));
    }
}
