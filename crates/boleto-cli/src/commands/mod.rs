//! Subcommand implementations.

pub mod info;
pub mod render;
pub mod text;
pub mod value;

use std::path::Path;

use boleto_core::{BoletoConfig, OcrBackend, TicketDocument};

/// Load the configuration file when one was given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BoletoConfig> {
    match config_path {
        Some(path) => Ok(BoletoConfig::from_file(Path::new(path))?),
        None => Ok(BoletoConfig::default()),
    }
}

/// Build the OCR backend this binary was compiled with.
#[cfg(feature = "tesseract")]
pub fn ocr_backend(config: &BoletoConfig) -> Box<dyn OcrBackend> {
    Box::new(boleto_core::TesseractOcr::new(config.ocr.data_path.clone()))
}

#[cfg(not(feature = "tesseract"))]
pub fn ocr_backend(_config: &BoletoConfig) -> Box<dyn OcrBackend> {
    Box::new(boleto_core::DisabledOcr)
}

/// Open a ticket document with the configured OCR backend.
pub fn open_document(
    input: &Path,
    password: Option<&str>,
    config: &BoletoConfig,
) -> anyhow::Result<TicketDocument> {
    let ocr = ocr_backend(config);
    let document = TicketDocument::open(input, password, ocr)?;
    Ok(document.with_config(config.clone()))
}
