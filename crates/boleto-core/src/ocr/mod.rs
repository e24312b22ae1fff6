//! OCR backend abstraction.
//!
//! The extraction pipeline only reaches for OCR when the native text layer
//! fails the quality gate, so the backend is injected into the document
//! and invoked lazily rather than loaded up front.

#[cfg(feature = "tesseract")]
pub mod tesseract;

use image::GrayImage;

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Abstraction over an OCR backend.
///
/// Implementations accept an 8-bit grayscale raster plus the recognition
/// language and a Tesseract-style page segmentation mode, and return the
/// recognized text.
pub trait OcrBackend {
    fn recognize(&self, image: &GrayImage, lang: &str, psm: u32) -> Result<String>;
}

// ── Mock backend (always available, used for tests) ──────────────────────

/// Returns a pre-set string, useful for unit testing the extraction
/// pipeline without requiring an OCR engine to be installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image: &GrayImage, _lang: &str, _psm: u32) -> Result<String> {
        Ok(self.text.clone())
    }
}

// ── Disabled backend ─────────────────────────────────────────────────────

/// Placeholder for builds or configurations without an OCR engine; every
/// recognition attempt fails with [`OcrError::NotAvailable`].
pub struct DisabledOcr;

impl OcrBackend for DisabledOcr {
    fn recognize(&self, _image: &GrayImage, _lang: &str, _psm: u32) -> Result<String> {
        Err(OcrError::NotAvailable)
    }
}
