//! Info command - show basic document information.

use std::path::PathBuf;

use clap::Args;

use super::{load_config, open_document};

/// Arguments for the info command.
#[derive(Args)]
pub struct InfoArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Password for encrypted PDFs
    #[arg(long)]
    password: Option<String>,
}

pub fn run(args: InfoArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let document = open_document(&args.input, args.password.as_deref(), &config)?;

    println!("File: {}", args.input.display());
    println!("Size: {:.2} MB", document.file_size_mb());
    println!("Pages: {}", document.page_count());

    for page in 0..document.page_count() {
        let (width, height) = document.page_size(page)?;
        println!("  page {}: {:.1} x {:.1} pt", page, width, height);
    }

    println!("Extraction mode: {}", document.last_extraction_mode());

    Ok(())
}
