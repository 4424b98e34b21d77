/// Extensions the reader accepts as input images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Extensions the writer can encode to.
pub const OUTPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Strength used for the heavily blurred backdrop behind the photo.
pub const BACKGROUND_BLUR_STRENGTH: i32 = 40;

/// Strength applied when the caller does not pick one.
pub const DEFAULT_BLUR_STRENGTH: i32 = 10;

/// Returns true if `path` has one of the given extensions (case-insensitive).
pub fn has_extension(path: &std::path::Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::png("photo.png", true)]
    #[case::upper_jpeg("PHOTO.JPEG", true)]
    #[case::webp("photo.webp", false)]
    #[case::no_extension("photo", false)]
    fn test_output_extensions(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(has_extension(Path::new(path), OUTPUT_EXTENSIONS), expected);
    }

    #[test]
    fn test_outputs_are_readable_inputs() {
        for ext in OUTPUT_EXTENSIONS {
            assert!(IMAGE_EXTENSIONS.contains(ext));
        }
    }
}
