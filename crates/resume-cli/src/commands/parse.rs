//! Parse command - extract fields from a single resume.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use resume_core::ResumeParser;

use super::{OcrBackendArg, load_config};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input resume PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use only the embedded text layer, never OCR
    #[arg(long)]
    text_only: bool,

    /// Minimum embedded text length before falling back to OCR
    #[arg(long)]
    min_text_length: Option<usize>,

    /// OCR backend to use for scanned documents
    #[arg(long, value_enum)]
    ocr_backend: Option<OcrBackendArg>,

    /// Report where the text came from
    #[arg(long)]
    show_source: bool,
}

pub fn run(args: ParseArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.text_only {
        config.acquisition.ocr_fallback = false;
    }
    if let Some(min) = args.min_text_length {
        config.acquisition.min_text_length = min;
    }
    if let Some(backend) = args.ocr_backend {
        config.ocr.backend = backend.into();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let parser = ResumeParser::from_config(&config)?;
    let parsed = parser.parse_detailed(&args.input)?;
    let output = parsed.record.to_json_pretty()?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_source {
        eprintln!(
            "{} Text source: {} ({} chars)",
            style("ℹ").blue(),
            parsed.source,
            parsed.text_chars
        );
        eprintln!(
            "{} Fields found: {}/{}",
            style("ℹ").blue(),
            parsed.record.iter().filter(|(_, f)| f.is_found()).count(),
            parsed.record.iter().count()
        );
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            parsed.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
