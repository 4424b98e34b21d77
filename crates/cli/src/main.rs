mod settings;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use photoblur_core::blurring::infrastructure::gaussian_blurrer::GaussianBlurrer;
use photoblur_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use photoblur_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use photoblur_core::pipeline::blur_image_use_case::BlurImageUseCase;
use photoblur_core::shared::constants::{has_extension, IMAGE_EXTENSIONS, OUTPUT_EXTENSIONS};

use settings::Settings;

/// Separable Gaussian blur for photos.
#[derive(Parser)]
#[command(name = "photoblur")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file (.png, .jpg or .jpeg).
    output: PathBuf,

    /// Blur strength (kernel radius in pixels, 0 = unchanged).
    #[arg(long, allow_negative_numbers = true)]
    strength: Option<i32>,

    /// Also write a heavily blurred backdrop copy to this path.
    #[arg(long)]
    backdrop: Option<PathBuf>,

    /// Settings file (defaults to the per-user config directory).
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = Settings::load(cli.settings.as_deref());
    let strength = cli.strength.unwrap_or(settings.default_strength);

    let use_case = BlurImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        Box::new(GaussianBlurrer::new()),
    );
    use_case.execute(&cli.input, &cli.output, strength)?;
    log::info!("Output written to {}", cli.output.display());

    if let Some(backdrop) = &cli.backdrop {
        use_case.execute(&cli.input, backdrop, settings.backdrop_strength)?;
        log::info!("Backdrop written to {}", backdrop.display());
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !has_extension(&cli.input, IMAGE_EXTENSIONS) {
        return Err(format!("Unsupported input format: {}", cli.input.display()).into());
    }
    check_output(&cli.output)?;
    if let Some(backdrop) = &cli.backdrop {
        check_output(backdrop)?;
    }
    Ok(())
}

fn check_output(path: &Path) -> Result<(), String> {
    if has_extension(path, OUTPUT_EXTENSIONS) {
        Ok(())
    } else {
        Err(format!(
            "Output must be one of {}: {}",
            OUTPUT_EXTENSIONS.join(", "),
            path.display()
        ))
    }
}
