//! Core library for extracting monetary values from Brazilian payment
//! tickets (boletos) in PDF form.
//!
//! This crate provides:
//! - region geometry (named flags, quadrant rectangles, reduction)
//! - a quality gate separating real text from decoder noise
//! - locale-aware parsing of monetary value candidates
//! - layered text extraction (native text layer with OCR fallback)
//! - the [`TicketDocument`] orchestrator tying it all together

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod ocr;
pub mod pdf;
pub mod quality;
pub mod values;

pub use config::{BoletoConfig, ExtractionConfig, OcrConfig};
pub use document::{ExtractionMode, TicketDocument};
pub use error::{BoletoError, Result};
pub use geometry::{flag_rect, quadrant_rects, Rect, RegionFlag};
pub use ocr::{DisabledOcr, MockRecognizer, OcrBackend};
pub use pdf::PdfEngine;
pub use values::{extract_candidates, truncate, Locale};

#[cfg(feature = "pdfium")]
pub use pdf::PdfiumEngine;

#[cfg(feature = "tesseract")]
pub use ocr::tesseract::TesseractOcr;
