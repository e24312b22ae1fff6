//! Tesseract backend, gated behind the `tesseract` feature.

use std::io::Cursor;

use image::ImageFormat;
use leptess::{LepTess, Variable};

use super::{OcrBackend, Result};
use crate::error::OcrError;

/// Tesseract-backed recognizer via leptess.
///
/// A fresh `LepTess` is created per call because the language and page
/// segmentation mode are per-request.
pub struct TesseractOcr {
    data_path: Option<String>,
}

impl TesseractOcr {
    /// `data_path` points at a tessdata directory; `None` uses the system
    /// default.
    pub fn new(data_path: Option<String>) -> Self {
        Self { data_path }
    }
}

impl OcrBackend for TesseractOcr {
    fn recognize(&self, image: &image::GrayImage, lang: &str, psm: u32) -> Result<String> {
        let mut lt = LepTess::new(self.data_path.as_deref(), lang)
            .map_err(|e| OcrError::Engine(e.to_string()))?;
        lt.set_variable(Variable::TesseditPagesegMode, &psm.to_string())
            .map_err(|e| OcrError::Engine(e.to_string()))?;

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OcrError::ImageEncode(e.to_string()))?;
        lt.set_image_from_mem(&png)
            .map_err(|e| OcrError::ImageEncode(e.to_string()))?;

        lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
    }
}
