//! Value command - resolve the payable amount of a single ticket.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use super::{load_config, open_document};

/// Arguments for the value command.
#[derive(Args)]
pub struct ValueArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Pages to inspect (default: all pages)
    #[arg(short, long, value_delimiter = ',')]
    pages: Option<Vec<u32>>,

    /// Largest value accepted as the ticket amount
    #[arg(long)]
    ceiling: Option<f64>,

    /// Allow the OCR fallback when the native text layer is unusable
    #[arg(long)]
    ocr: bool,

    /// Password for encrypted PDFs
    #[arg(long)]
    password: Option<String>,
}

pub fn run(args: ValueArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let ceiling = args.ceiling.unwrap_or(config.extraction.ceiling);

    let mut document = open_document(&args.input, args.password.as_deref(), &config)?;
    debug!(pages = document.page_count(), size_mb = document.file_size_mb(), "opened ticket");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Resolving ticket value...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let value = document.ticket_value(args.pages.as_deref(), ceiling, args.ocr)?;

    spinner.finish_and_clear();

    match value {
        Some(value) => println!("Ticket value: {:.2}", value),
        None => println!("{}", style("Ticket value not found").yellow()),
    }
    println!("Time: {:.2} s", start.elapsed().as_secs_f64());
    println!("Extraction mode: {}", document.last_extraction_mode());

    Ok(())
}
