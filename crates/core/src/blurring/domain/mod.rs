pub mod blur_request;
pub mod image_blurrer;
pub mod kernel;
