use crate::shared::error::BlurError;

/// Largest channel count a buffer may carry (RGBA).
pub const MAX_CHANNELS: u8 = 4;

/// A decoded raster image: contiguous `u8` samples in row-major order with
/// channels interleaved.
///
/// Format conversion happens at the imaging boundary; the engine treats the
/// samples as opaque per-channel intensities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl PixelBuffer {
    /// Wraps `data` as a `width x height` image with `channels` samples per pixel.
    ///
    /// Fails when the channel count is outside `1..=4` or when
    /// `data.len() != width * height * channels`.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, BlurError> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(BlurError::InvalidParameter {
                name: "channels",
                value: channels as i64,
                reason: "must be between 1 and 4",
            });
        }
        let expected = sample_count(width, height, channels);
        if data.len() != expected {
            return Err(BlurError::BufferLength {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Allocates a zeroed buffer, reporting allocation failure instead of aborting.
    pub fn zeroed(width: u32, height: u32, channels: u8) -> Result<Self, BlurError> {
        let len = sample_count(width, height, channels);
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BlurError::Allocation { bytes: len })?;
        data.resize(len, 0);
        Self::new(data, width, height, channels)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of samples in one row (`width * channels`).
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let offset = (y as usize * self.width as usize + x as usize) * c;
        &self.data[offset..offset + c]
    }

    /// Same dimensions and channel layout as `other`.
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }
}

/// Saturates instead of overflowing; a saturated count never matches real
/// data and never fits an allocation.
fn sample_count(width: u32, height: u32, channels: u8) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(channels as usize)
}
