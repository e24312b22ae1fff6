//! Error types for the boleto-core library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the boleto library.
#[derive(Error, Debug)]
pub enum BoletoError {
    /// Region geometry error.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// PDF engine error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR backend error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Value extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Document-level error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to region geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Reduction percentage outside the accepted range.
    #[error("reduction percentage must be in [0, 0.5), got {0}")]
    ReductionOutOfRange(f64),

    /// Region flag name not in the closed set.
    #[error("unrecognized flag '{0}', possible values: {1}")]
    UnknownFlag(String, String),
}

/// Errors related to the PDF engine.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF source.
    #[error("failed to open PDF: {0}")]
    Open(String),

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page index requested.
    #[error("invalid page index: {0}")]
    InvalidPage(u32),

    /// Failed to extract text from the native text layer.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to rasterize a page.
    #[error("failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },

    /// The pdfium library could not be bound.
    #[error("pdfium unavailable: {0}")]
    Engine(String),
}

/// Errors related to the OCR backend.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to encode the raster for the OCR engine.
    #[error("image encode error: {0}")]
    ImageEncode(String),

    /// The OCR engine itself failed.
    #[error("OCR engine error: {0}")]
    Engine(String),

    /// No OCR backend is configured in this build.
    #[error("OCR backend not available, build with the `tesseract` feature")]
    NotAvailable,
}

/// Errors related to value extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Locale name not in the closed set.
    #[error("unknown locale '{0}', possible values: br, us")]
    UnknownLocale(String),
}

/// Errors related to the document wrapper.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Source file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Source file is not a PDF.
    #[error("unsupported extension '{0}', only '.pdf' files are accepted")]
    UnsupportedExtension(String),

    /// Requested page indices beyond the document.
    #[error("pages not found: {0:?}")]
    PagesNotFound(Vec<u32>),
}

/// Result type for the boleto library.
pub type Result<T> = std::result::Result<T, BoletoError>;
