use std::path::Path;

use crate::blurring::domain::blur_request::BlurRequest;
use crate::blurring::domain::image_blurrer::ImageBlurrer;
use crate::imaging::domain::image_io_error::ImageIoError;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;

/// Single-image blurring pipeline: read → blur → write.
pub struct BlurImageUseCase {
    reader: Box<dyn ImageReader>,
    writer: Box<dyn ImageWriter>,
    blurrer: Box<dyn ImageBlurrer>,
}

impl BlurImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        writer: Box<dyn ImageWriter>,
        blurrer: Box<dyn ImageBlurrer>,
    ) -> Self {
        Self {
            reader,
            writer,
            blurrer,
        }
    }

    /// Reads `input`, blurs it at `strength`, and writes the result to `output`.
    pub fn execute(&self, input: &Path, output: &Path, strength: i32) -> Result<(), ImageIoError> {
        let source = self.reader.read(input)?;
        log::info!(
            "Loaded {} ({}x{})",
            input.display(),
            source.width(),
            source.height()
        );

        let blurred = self.blurrer.blur(BlurRequest::new(&source, strength))?;
        self.writer.write(output, &blurred)?;
        log::info!("Wrote {} at strength {}", output.display(), strength);
        Ok(())
    }
}
