//! CLI for extracting the value of boleto payment tickets.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{info, render, text, value};

/// Boleto value extraction - pull the payable amount out of a payment
/// ticket PDF
#[derive(Parser)]
#[command(name = "boleto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the ticket value of a PDF
    Value(value::ValueArgs),

    /// Dump the extracted text of a PDF
    Text(text::TextArgs),

    /// Render a page region to an image file
    Render(render::RenderArgs),

    /// Show document information
    Info(info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Value(args) => value::run(args, cli.config.as_deref()),
        Commands::Text(args) => text::run(args, cli.config.as_deref()),
        Commands::Render(args) => render::run(args, cli.config.as_deref()),
        Commands::Info(args) => info::run(args, cli.config.as_deref()),
    }
}
