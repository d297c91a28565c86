use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oil_core::{FilterType, ImageJob, PngCompression, ResizeOptions};

#[derive(Parser)]
#[command(name = "oilscale")]
#[command(about = "Resize a JPEG or PNG read from stdin to fit a box, writing the result to stdout")]
struct Cli {
    /// Maximum output width in pixels
    width: u32,

    /// Maximum output height in pixels
    height: u32,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = oil_core::options::DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Resampling filter
    #[arg(short, long, value_enum, default_value_t = Filter::Bilinear)]
    filter: Filter,

    /// PNG compression effort
    #[arg(long, value_enum, default_value_t = Compression::Default)]
    png_compression: Compression,

    /// Background colour for transparent pixels, as RRGGBB hex
    #[arg(short, long, default_value = "000000")]
    background: String,

    /// Log pipeline steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Bilinear => FilterType::Bilinear,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Compression {
    Fast,
    Default,
    Best,
}

impl From<Compression> for PngCompression {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Fast => PngCompression::Fast,
            Compression::Default => PngCompression::Default,
            Compression::Best => PngCompression::Best,
        }
    }
}

fn parse_hex_color(s: &str) -> Result<[u8; 3]> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("expected a colour as RRGGBB, got {s:?}");
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid colour {s:?}"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn run(cli: Cli, input: impl Read, mut output: impl Write) -> Result<()> {
    let options = ResizeOptions::new()
        .with_filter(cli.filter.into())
        .with_jpeg_quality(cli.quality)
        .with_png_compression(cli.png_compression.into())
        .with_background(parse_hex_color(&cli.background)?);

    let mut job = ImageJob::with_options(input, cli.width, cli.height, options)
        .context("failed to read image header")?;
    tracing::info!(
        format = %job.format(),
        from = %format!("{}x{}", job.native_width(), job.native_height()),
        to = %format!("{}x{}", job.final_width(), job.final_height()),
        "resizing"
    );

    let mut encoded = Vec::new();
    job.emit(|bytes| encoded = bytes)
        .context("failed to resize image")?;

    output
        .write_all(&encoded)
        .and_then(|_| output.flush())
        .context("failed to write output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "oilscale=debug,oil_core=debug"
    } else {
        "oilscale=warn,oil_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    run(cli, io::stdin().lock(), io::stdout().lock())
}
