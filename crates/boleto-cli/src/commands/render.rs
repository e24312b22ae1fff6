//! Render command - save a page region as an image file.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;
use console::style;

use boleto_core::RegionFlag;

use super::{load_config, open_document};

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Page to render
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Region to render
    #[arg(short, long, default_value = "all")]
    flag: String,

    /// Scale factor for rasterization
    #[arg(short, long, default_value_t = 1.0)]
    scale: f32,

    /// Reduction percentage shrinking the region inward, in [0, 0.5)
    #[arg(short, long, default_value_t = 0.0)]
    reduction: f64,

    /// Output image file
    #[arg(short, long, required = true)]
    output: PathBuf,

    /// Password for encrypted PDFs
    #[arg(long)]
    password: Option<String>,
}

pub fn run(args: RenderArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let flag = RegionFlag::from_str(&args.flag)?;

    let document = open_document(&args.input, args.password.as_deref(), &config)?;
    let region = document.render(args.page, flag, args.scale, args.reduction)?;

    region.save(&args.output)?;
    println!(
        "{} Rendered {}x{} region to {}",
        style("✓").green(),
        region.width(),
        region.height(),
        args.output.display()
    );

    Ok(())
}
