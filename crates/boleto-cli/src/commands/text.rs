//! Text command - dump the extracted text of a ticket.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use console::style;
use serde_json::json;

use boleto_core::RegionFlag;

use super::{load_config, open_document};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Region to extract from
    #[arg(short, long, default_value = "all")]
    flag: String,

    /// Reduction percentage shrinking the region inward, in [0, 0.5)
    #[arg(short, long, default_value_t = 0.0)]
    reduction: f64,

    /// Pages to extract (default: all pages)
    #[arg(short, long, value_delimiter = ',')]
    pages: Option<Vec<u32>>,

    /// Allow the OCR fallback when the native text layer is unusable
    #[arg(long)]
    ocr: bool,

    /// Skip the native text layer and always OCR
    #[arg(long)]
    force_ocr: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Password for encrypted PDFs
    #[arg(long)]
    password: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON with the text and extraction mode
    Json,
}

pub fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let flag = RegionFlag::from_str(&args.flag)?;

    let mut document = open_document(&args.input, args.password.as_deref(), &config)?;

    let text = document.text(
        args.pages.as_deref(),
        flag,
        args.ocr,
        args.force_ocr,
        args.reduction,
    )?;

    let output = match args.format {
        OutputFormat::Text => text,
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "text": text,
            "extraction_mode": document.last_extraction_mode().to_string(),
        }))?,
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Text written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
