use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ferrdocx_core::consts::*;
use ferrdocx_core::{ConverterConfig, PageRange, PdfConverter, PdfInput};

#[derive(Parser)]
#[command(name = "convert")]
#[command(about = "Convert a catalogue style PDF to DOCX")]
struct Args {
    #[arg(help = "Input PDF file path")]
    input: PathBuf,

    #[arg(
        short,
        long,
        help = "Output DOCX path, defaults to the input name with a .docx extension"
    )]
    output: Option<PathBuf>,

    #[arg(long, default_value = "0", help = "First page to convert (0-based)")]
    start: u16,

    #[arg(long, help = "Last page to convert (0-based, inclusive), defaults to the last page")]
    end: Option<u16>,

    #[arg(short, long, help = "JSON file with reconstruction and layout thresholds")]
    config: Option<PathBuf>,

    #[arg(long, help = "Password of an encrypted PDF")]
    password: Option<String>,
}

fn run(args: Args) -> anyhow::Result<PathBuf> {
    let config = match &args.config {
        Some(path) => ConverterConfig::from_json_file(path)?,
        None => ConverterConfig::default(),
    };

    let converter = PdfConverter::new(config)?;
    let input = PdfInput::from_path(&args.input)?
        .with_password(args.password)
        .with_range(PageRange::new(args.start, args.end));

    let docx = converter.convert(&input)?;

    let output = args.output.unwrap_or_else(|| args.input.with_file_name(&docx.file_name));
    docx.save(&output)?;

    Ok(output)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(output) => info!("saved {}", output.display()),
        Err(err) => {
            error!("conversion failed: {err:#}");
            eprintln!("{SCANNED_PDF_HINT}");
            std::process::exit(1);
        }
    }
}
