use std::borrow::Cow;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::blurring::domain::kernel::Kernel;
use crate::shared::error::BlurError;
use crate::shared::pixel_buffer::PixelBuffer;

/// Direction a 1D pass runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Number of pixels the kernel slides over on this axis.
    pub fn len(self, buffer: &PixelBuffer) -> usize {
        match self {
            Axis::Horizontal => buffer.width() as usize,
            Axis::Vertical => buffer.height() as usize,
        }
    }
}

/// Strict boundary rule: errors once the kernel radius reaches half the axis
/// length (`2 * radius >= axis_len`). The identity kernel always fits.
///
/// [`convolve_1d`] never calls this; it truncates oversized kernels to radius
/// `axis_len / 2` instead.
pub fn check_kernel_fits(kernel: &Kernel, axis_len: usize) -> Result<(), BlurError> {
    if !kernel.is_identity() && kernel.radius().saturating_mul(2) >= axis_len {
        return Err(BlurError::DimensionMismatch {
            radius: kernel.radius(),
            axis_len,
        });
    }
    Ok(())
}

/// Applies `kernel` along one axis and returns a new buffer of the same shape.
///
/// Samples outside the image reuse the nearest edge pixel (clamp-to-edge).
/// Each channel is accumulated independently in `f32`, then rounded to the
/// nearest integer and clamped to `0..=255`. A kernel wider than the axis is
/// truncated to radius `axis_len / 2` and renormalized.
pub fn convolve_1d(
    buffer: &PixelBuffer,
    kernel: &Kernel,
    axis: Axis,
) -> Result<PixelBuffer, BlurError> {
    let mut output = PixelBuffer::zeroed(buffer.width(), buffer.height(), buffer.channels())?;
    if buffer.is_empty() {
        return Ok(output);
    }

    let kernel = fit_kernel(kernel, axis.len(buffer));
    if kernel.is_identity() {
        output.data_mut().copy_from_slice(buffer.data());
        return Ok(output);
    }

    let weights = kernel.weights();
    match axis {
        Axis::Horizontal => for_each_row(&mut output, |y, out_row| {
            horizontal_row(buffer, weights, y, out_row)
        }),
        Axis::Vertical => for_each_row(&mut output, |y, out_row| {
            vertical_row(buffer, weights, y, out_row)
        }),
    }
    Ok(output)
}

fn fit_kernel(kernel: &Kernel, axis_len: usize) -> Cow<'_, Kernel> {
    let max_radius = axis_len / 2;
    if kernel.radius() > max_radius {
        log::debug!(
            "Truncating kernel radius {} to {} for axis of length {}",
            kernel.radius(),
            max_radius,
            axis_len
        );
        Cow::Owned(kernel.truncated(max_radius))
    } else {
        Cow::Borrowed(kernel)
    }
}

/// Runs `f(y, row)` over every output row. Rows are disjoint, so the
/// `parallel` build hands them to rayon workers without synchronization.
#[cfg(not(feature = "parallel"))]
fn for_each_row<F>(output: &mut PixelBuffer, f: F)
where
    F: Fn(usize, &mut [u8]),
{
    let row_len = output.row_len();
    output
        .data_mut()
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(feature = "parallel")]
fn for_each_row<F>(output: &mut PixelBuffer, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    let row_len = output.row_len();
    output
        .data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Source index for tap `k` around `pos`, clamped to `[0, len)`.
#[inline]
fn clamp_to_edge(pos: usize, k: usize, half: usize, len: usize) -> usize {
    (pos as isize + k as isize - half as isize)
        .max(0)
        .min((len - 1) as isize) as usize
}

#[inline]
fn quantize(sum: f32) -> u8 {
    sum.round().clamp(0.0, 255.0) as u8
}

fn horizontal_row(src: &PixelBuffer, weights: &[f32], y: usize, out_row: &mut [u8]) {
    let width = src.width() as usize;
    let channels = src.channels() as usize;
    let row_len = src.row_len();
    let half = weights.len() / 2;
    let row = &src.data()[y * row_len..(y + 1) * row_len];

    for x in 0..width {
        for c in 0..channels {
            let mut sum = 0.0f32;
            for (k, &w) in weights.iter().enumerate() {
                let sx = clamp_to_edge(x, k, half, width);
                sum += row[sx * channels + c] as f32 * w;
            }
            out_row[x * channels + c] = quantize(sum);
        }
    }
}

fn vertical_row(src: &PixelBuffer, weights: &[f32], y: usize, out_row: &mut [u8]) {
    let height = src.height() as usize;
    let row_len = src.row_len();
    let half = weights.len() / 2;
    let data = src.data();

    // Accumulate whole source rows so reads stay sequential in memory.
    let mut sums = vec![0.0f32; row_len];
    for (k, &w) in weights.iter().enumerate() {
        let sy = clamp_to_edge(y, k, half, height);
        let row = &data[sy * row_len..(sy + 1) * row_len];
        for (acc, &v) in sums.iter_mut().zip(row) {
            *acc += v as f32 * w;
        }
    }
    for (out, &sum) in out_row.iter_mut().zip(&sums) {
        *out = quantize(sum);
    }
}
