use clap::Parser;
use raster_rotate::config::{self, CliOverrides};
use raster_rotate::output;
use raster_rotate::raster::{ImageCodec, RotateParams, rotate_file};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "raster-rotate")]
#[command(about = "Rotate an image by an arbitrary angle")]
#[command(long_about = "\
Rotate an image by an arbitrary angle

The image turns counter-clockwise about its center by ANGLE degrees
(negative values turn clockwise). The output keeps the input's size:
corners that rotate out of frame are cut off and uncovered areas are black.
Each output pixel is a bilinear blend of the four nearest source pixels.

The output format follows the OUTPUT extension:
  .jpg .jpeg .png .tif .tiff .webp .bmp

Examples:
  raster-rotate photo.jpg rotated.png 30
  raster-rotate --quality 95 scan.png scan.jpg -1.5

Run 'raster-rotate --print-config' for a documented config file.")]
#[command(version, allow_negative_numbers = true)]
struct Cli {
    /// Image to rotate
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Where to write the rotated image
    #[arg(required_unless_present = "print_config")]
    output: Option<PathBuf>,

    /// Rotation in degrees, counter-clockwise
    #[arg(required_unless_present = "print_config", value_parser = parse_angle)]
    angle: Option<f64>,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum worker threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Render on a single thread
    #[arg(long)]
    sequential: bool,

    /// JPEG quality, 1-100
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log filter for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print a stock config file with all options documented, then exit
    #[arg(long)]
    print_config: bool,
}

/// Parse an angle, rejecting NaN and infinities.
fn parse_angle(s: &str) -> Result<f64, String> {
    let angle: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of degrees"))?;
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(format!("'{s}' is not a finite angle"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let (Some(input), Some(output_path), Some(angle)) = (cli.input, cli.output, cli.angle) else {
        return Err("INPUT, OUTPUT and ANGLE are required".into());
    };

    let overrides = CliOverrides {
        max_threads: cli.threads,
        sequential: cli.sequential,
        quality: cli.quality,
    };
    let rotate_config = config::load_config(cli.config.as_deref(), &overrides)?;
    init_thread_pool(&rotate_config.processing);

    let params = RotateParams {
        input,
        output: output_path,
        angle_degrees: angle,
        quality: rotate_config.quality(),
        execution: rotate_config.execution(),
    };
    info!(?params, "starting rotation");

    let report = rotate_file(&ImageCodec::new(), &params)?;

    if cli.json {
        output::print_report_json(&report)?;
    } else {
        output::print_rotation_report(&report);
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout stays clean for the report.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
