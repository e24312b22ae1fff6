//! PDF engine abstraction.

#[cfg(feature = "pdfium")]
mod pdfium;

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumEngine;

use image::GrayImage;

use crate::error::PdfError;
use crate::geometry::Rect;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for the PDF engine backing a ticket document.
///
/// Implementations expose paging, rasterization and the native text layer;
/// everything above this trait is engine-agnostic.
pub trait PdfEngine {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Page size in points, as `(width, height)`.
    fn page_size(&self, index: u32) -> Result<(f64, f64)>;

    /// Rasterize a page at the given scale as an 8-bit grayscale image.
    fn render_page(&self, index: u32, scale: f32) -> Result<GrayImage>;

    /// Text from the native text layer restricted to `rect`.
    ///
    /// The rectangle arrives in the (row, column) space the geometry layer
    /// produces; implementations hand its bounds to the engine's bounded
    /// text lookup as-is.
    fn bounded_text(&self, index: u32, rect: &Rect) -> Result<String>;
}
