//! Separable Gaussian blur engine.
//!
//! The engine turns a decoded [`PixelBuffer`](shared::pixel_buffer::PixelBuffer)
//! and an integer strength into a blurred buffer of the same shape. File
//! decoding and encoding live behind the [`imaging`] ports so the engine
//! itself never touches the filesystem.

pub mod blurring;
pub mod imaging;
pub mod pipeline;
pub mod shared;

pub use blurring::domain::blur_request::BlurRequest;
pub use blurring::domain::kernel::{build_kernel, build_kernel_capped, Kernel};
pub use blurring::infrastructure::convolution::{check_kernel_fits, convolve_1d, Axis};
pub use blurring::infrastructure::gaussian_blurrer::{blur, GaussianBlurrer};
pub use shared::error::BlurError;
pub use shared::pixel_buffer::PixelBuffer;
