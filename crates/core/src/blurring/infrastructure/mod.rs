pub mod convolution;
pub mod gaussian_blurrer;
