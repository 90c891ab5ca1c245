use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use ferrdocx_core::parser::reconstruct_pages;
use ferrdocx_core::{ConverterConfig, PageRange, PdfConverter, PdfInput};

#[derive(Parser)]
#[command(name = "inspect")]
#[command(about = "Print the blocks, headers and rows of a PDF page as JSON")]
struct Args {
    #[arg(help = "Input PDF file path")]
    input: PathBuf,

    #[arg(short, long, default_value = "0", help = "Page number to inspect (0-based)")]
    page: u16,

    #[arg(short, long, help = "JSON file with reconstruction and layout thresholds")]
    config: Option<PathBuf>,

    #[arg(long, help = "Only print headers and rows, not the raw blocks")]
    rows_only: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ConverterConfig::from_json_file(path)?,
        None => ConverterConfig::default(),
    };

    let converter = PdfConverter::new(config)?;
    let input =
        PdfInput::from_path(&args.input)?.with_range(PageRange::new(args.page, Some(args.page)));

    let pages = converter.extract_pages(&input)?;
    let (headers, rows) = reconstruct_pages(&pages, converter.config());

    let report = if args.rows_only {
        json!({ "headers": headers, "rows": rows })
    } else {
        json!({ "pages": pages, "headers": headers, "rows": rows })
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
