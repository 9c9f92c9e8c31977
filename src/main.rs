use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mraw_reader_rs::image_pipeline::{
    BitOrder, ConversionConfig, MrawReader, MrawToTiffPipeline, ReaderConfig, TiffCompression,
};
use mraw_reader_rs::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mraw-reader")]
#[command(version)]
#[command(
    about = "Reads high-speed camera recordings (.cih/.cihx metadata + .mraw pixel data).",
    long_about = None,
    after_help = "Examples:\n  mraw-reader info ./recording\n  mraw-reader export ./recording -o frame.tiff --frame 10\n  mraw-reader export ./recording -o frames/ --frame 0 --count 100 --compression lzw"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the acquisition parameters of a recording
    Info {
        /// Directory holding the .cih/.cihx and .mraw files
        dir: PathBuf,

        /// Run the bit order check against frame 0
        #[arg(long)]
        check_bit_order: bool,
    },
    /// Export frames as TIFF
    Export {
        /// Directory holding the .cih/.cihx and .mraw files
        dir: PathBuf,

        /// Output TIFF path, or output directory when --count is greater than 1
        #[arg(short, long)]
        output: PathBuf,

        /// First frame to export
        #[arg(long, default_value_t = 0)]
        frame: usize,

        /// Number of frames to export
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// none, lzw, deflate-fast, deflate, deflate-best
        #[arg(long, default_value = "none")]
        compression: TiffCompression,

        /// Apply the horizontal differencing predictor
        #[arg(long)]
        predictor: bool,

        /// Run the bit order check against frame 0 before exporting
        #[arg(long)]
        check_bit_order: bool,

        /// Force the bit order (higher or lower) instead of the recorded one
        #[arg(long)]
        bit_order: Option<BitOrder>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Info { dir, check_bit_order } => cmd_info(dir, check_bit_order),
        Commands::Export {
            dir,
            output,
            frame,
            count,
            compression,
            predictor,
            check_bit_order,
            bit_order,
        } => {
            let reader_config = ReaderConfig::builder()
                .check_bit_order(check_bit_order)
                .bit_order_override(bit_order)
                .build();
            let conversion_config = ConversionConfig::builder()
                .compression(compression)
                .predictor(predictor.then_some(2))
                .build();
            cmd_export(dir, output, frame, count, &reader_config, conversion_config)
        }
    }
}

fn cmd_info(dir: PathBuf, check_bit_order: bool) -> Result<()> {
    let config = ReaderConfig::builder().check_bit_order(check_bit_order).build();
    let reader = MrawReader::open(&dir, &config)
        .with_context(|| format!("failed to open recording in {}", dir.display()))?;

    let params = reader.parameters();
    let (width, height) = reader.dimensions();
    println!("Dimensions:      {width}x{height}");
    println!("Total frames:    {}", reader.frame_count());
    println!("Frame rate:      {} fps", reader.frame_rate());
    println!("Bit size:        {}", params.bit_size);
    println!("Effective depth: {}", params.effective_bit_depth());
    println!("Bit shift:       {}", params.bit_shift);
    println!("Bit order:       {}", reader.bit_order());
    println!("Frame stride:    {} bytes", params.frame_stride());
    Ok(())
}

fn cmd_export(
    dir: PathBuf,
    output: PathBuf,
    frame: usize,
    count: usize,
    reader_config: &ReaderConfig,
    conversion_config: ConversionConfig,
) -> Result<()> {
    if count == 0 {
        bail!("--count must be at least 1");
    }

    let mut reader = MrawReader::open(&dir, reader_config)
        .with_context(|| format!("failed to open recording in {}", dir.display()))?;
    let pipeline = MrawToTiffPipeline::new(conversion_config);

    info!("Compression: {:?}", pipeline.config().compression);

    if count == 1 {
        pipeline
            .convert_file(&mut reader, frame, &output)
            .with_context(|| format!("failed to export frame {frame}"))?;
        info!("Wrote {}", output.display());
    } else {
        let written = pipeline
            .convert_range(&mut reader, frame, count, &output)
            .with_context(|| format!("failed to export frames {frame}..{}", frame + count))?;
        info!("Wrote {} frames to {}", written.len(), output.display());
    }

    Ok(())
}
