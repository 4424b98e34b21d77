use std::time::Instant;

use crate::blurring::domain::blur_request::BlurRequest;
use crate::blurring::domain::image_blurrer::ImageBlurrer;
use crate::blurring::domain::kernel::build_kernel_capped;
use crate::shared::error::BlurError;
use crate::shared::pixel_buffer::PixelBuffer;

use super::convolution::{convolve_1d, Axis};

/// Blurs `request.buffer` with a separable Gaussian of the requested strength.
///
/// Builds the kernel once, runs a horizontal pass and then a vertical pass,
/// and returns the result. Taps beyond half the longer side are never
/// computed, so any non-negative strength works on any image. Strength 0 returns an exact copy. Each call owns
/// its intermediate buffer, so concurrent calls share nothing.
///
/// Blurring is not idempotent: `blur(blur(x))` is generally softer than
/// `blur(x)`.
///
/// # Errors
///
/// [`BlurError::InvalidParameter`] for a negative strength and
/// [`BlurError::Allocation`] if an output buffer cannot be allocated.
pub fn blur(request: BlurRequest<'_>) -> Result<PixelBuffer, BlurError> {
    let src = request.buffer;
    let max_radius = src.width().max(src.height()) as usize / 2;
    let kernel = build_kernel_capped(request.strength, max_radius)?;
    if kernel.is_identity() {
        return Ok(src.clone());
    }

    let started = Instant::now();
    let horizontal = convolve_1d(src, &kernel, Axis::Horizontal)?;
    let output = convolve_1d(&horizontal, &kernel, Axis::Vertical)?;
    log::debug!(
        "Blurred {}x{}x{} at strength {} (radius {}) in {:.1}ms",
        src.width(),
        src.height(),
        src.channels(),
        request.strength,
        kernel.radius(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(output)
}

/// CPU separable Gaussian blurrer.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaussianBlurrer;

impl GaussianBlurrer {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBlurrer for GaussianBlurrer {
    fn blur(&self, request: BlurRequest<'_>) -> Result<PixelBuffer, BlurError> {
        blur(request)
    }
}
