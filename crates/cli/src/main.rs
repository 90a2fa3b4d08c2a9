use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use cloudpix_core::detection::domain::connector::Connector;
use cloudpix_core::detection::infrastructure::http_feature_extractor::HttpConnector;
use cloudpix_core::detection::infrastructure::sidecar_connector::SidecarConnector;
use cloudpix_core::imaging::domain::image_encoder::OutputFormat;
use cloudpix_core::imaging::infrastructure::file_image_reader::FileImageReader;
use cloudpix_core::imaging::infrastructure::std_image_encoder::StdImageEncoder;
use cloudpix_core::pipeline::batch_pixelate_use_case::{BatchPixelateUseCase, DEFAULT_WORKERS};
use cloudpix_core::pipeline::pixelate_image_use_case::PixelateImageUseCase;
use cloudpix_core::pipeline::pixelizer_logger::LogPixelizerLogger;
use cloudpix_core::pipeline::policy::{CarMode, FaceMode, PixelatePolicy};
use cloudpix_core::redaction::infrastructure::block_pixelator::{BlockPixelator, OutlineStyle};
use cloudpix_core::shared::constants::{DEFAULT_MERGE_FACTOR, DEFAULT_OUTPUT_QUALITY};

/// Pixelate faces, license plates and text on vehicles in images.
#[derive(Parser)]
#[command(name = "cloudpix")]
struct Cli {
    /// Input image file or directory.
    input: PathBuf,

    /// Output file (or directory when the input is a directory).
    output: PathBuf,

    /// Face handling: skip, faces or persons.
    #[arg(long, default_value = "faces")]
    faces: String,

    /// Vehicle handling: skip, cars or plates-and-text.
    #[arg(long, default_value = "plates-and-text")]
    cars: String,

    /// Text merge distance as a fraction of the image width.
    #[arg(long, default_value_t = DEFAULT_MERGE_FACTOR)]
    merge_factor: f64,

    /// Output format: jpeg or png.
    #[arg(long, default_value = "jpeg")]
    format: String,

    /// JPEG quality (0-100).
    #[arg(long, default_value_t = DEFAULT_OUTPUT_QUALITY)]
    quality: u8,

    /// Stroke redacted regions with this color (hex, e.g. "#ff0000").
    #[arg(long)]
    outline: Option<String>,

    /// Outline stroke width in pixels.
    #[arg(long, default_value = "2")]
    outline_width: u32,

    /// Recurse into subdirectories in batch mode.
    #[arg(long)]
    recursive: bool,

    /// Worker threads in batch mode (caps concurrent detection calls).
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Detection service base URL. Without it, detections are read from
    /// "<image>.json" sidecar files.
    #[arg(long)]
    endpoint: Option<String>,
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

    let policy = PixelatePolicy {
        face_mode: parse_face_mode(&cli.faces)?,
        car_mode: parse_car_mode(&cli.cars)?,
        merge_factor: cli.merge_factor,
    };
    let format = parse_format(&cli.format)?;
    let outline = cli
        .outline
        .as_deref()
        .map(|hex| {
            Ok::<_, Box<dyn std::error::Error>>(OutlineStyle {
                rgb: parse_hex_color(hex)?,
                thickness: cli.outline_width,
            })
        })
        .transpose()?;

    let connector: Arc<dyn Connector> = match &cli.endpoint {
        Some(url) => Arc::new(HttpConnector::new(url.clone())?),
        None => Arc::new(SidecarConnector::new()),
    };
    let pixelator = BlockPixelator::with_outline(outline);

    if cli.input.is_dir() {
        run_batch(&cli, connector, policy, pixelator, format)
    } else {
        let mut use_case = build_use_case(connector, policy, pixelator, format, cli.quality);
        use_case.execute(&cli.input, &cli.output)
    }
}

fn run_batch(
    cli: &Cli,
    connector: Arc<dyn Connector>,
    policy: PixelatePolicy,
    pixelator: BlockPixelator,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let extensions: Vec<&str> = connector.supported_extensions().to_vec();
    let quality = cli.quality;
    let factory = {
        let connector = connector.clone();
        Box::new(move || {
            build_use_case(
                connector.clone(),
                policy.clone(),
                pixelator.clone(),
                format,
                quality,
            )
        })
    };

    let batch = BatchPixelateUseCase::new(factory, &extensions, cli.workers);
    let summary = batch.execute(&cli.input, &cli.output, cli.recursive)?;
    log::info!(
        "batch finished: {} processed, {} failed",
        summary.processed,
        summary.failed
    );
    if summary.failed > 0 {
        return Err(format!("{} image(s) failed", summary.failed).into());
    }
    Ok(())
}

fn build_use_case(
    connector: Arc<dyn Connector>,
    policy: PixelatePolicy,
    pixelator: BlockPixelator,
    format: OutputFormat,
    quality: u8,
) -> PixelateImageUseCase {
    PixelateImageUseCase::new(
        Box::new(FileImageReader::new()),
        Box::new(StdImageEncoder::new(format, quality)),
        Box::new(pixelator),
        connector,
        policy,
        Box::new(LogPixelizerLogger),
    )
}

fn parse_face_mode(value: &str) -> Result<FaceMode, String> {
    match value {
        "skip" => Ok(FaceMode::Skip),
        "faces" => Ok(FaceMode::Faces),
        "persons" => Ok(FaceMode::Persons),
        other => Err(format!("unknown face mode '{other}' (skip, faces, persons)")),
    }
}

fn parse_car_mode(value: &str) -> Result<CarMode, String> {
    match value {
        "skip" => Ok(CarMode::Skip),
        "cars" => Ok(CarMode::Cars),
        "plates-and-text" => Ok(CarMode::PlatesAndTextOnCars),
        other => Err(format!(
            "unknown car mode '{other}' (skip, cars, plates-and-text)"
        )),
    }
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    match value {
        "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
        "png" => Ok(OutputFormat::Png),
        other => Err(format!("unknown output format '{other}' (jpeg, png)")),
    }
}

fn parse_hex_color(value: &str) -> Result<[u8; 3], String> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid color '{value}', expected #RRGGBB"));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}
