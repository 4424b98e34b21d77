use std::path::PathBuf;

use thiserror::Error;

use crate::shared::error::BlurError;

#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported output format for {path} (expected png, jpg or jpeg)")]
    UnsupportedFormat { path: PathBuf },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Blur(#[from] BlurError),
}
