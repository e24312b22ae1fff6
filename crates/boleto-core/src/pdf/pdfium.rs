//! PDF engine backed by pdfium via the `pdfium-render` bindings.

use image::GrayImage;
use pdfium_render::prelude::*;
use tracing::debug;

use super::{PdfEngine, Result};
use crate::error::PdfError;
use crate::geometry::Rect;

/// Pdfium-backed engine.
///
/// Owns the source bytes and reloads the document per operation, which
/// keeps the engine free of self-referential lifetimes; the reload is
/// cheap next to rasterization and OCR. Pdfium itself is bound once per
/// engine, preferring a library next to the executable over the system
/// one.
pub struct PdfiumEngine {
    pdfium: Pdfium,
    data: Vec<u8>,
    password: Option<String>,
    page_count: u32,
}

impl PdfiumEngine {
    /// Bind pdfium and open a document from bytes, validating it up front
    /// so open errors surface here rather than on first use.
    pub fn from_bytes(data: Vec<u8>, password: Option<&str>) -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| PdfError::Engine(e.to_string()))?;
        let pdfium = Pdfium::new(bindings);

        let mut engine = Self {
            pdfium,
            data,
            password: password.map(String::from),
            page_count: 0,
        };

        let page_count = engine.document()?.pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!(page_count, "opened PDF document");

        engine.page_count = page_count;
        Ok(engine)
    }

    fn document(&self) -> Result<PdfDocument<'_>> {
        self.pdfium
            .load_pdf_from_byte_slice(&self.data, self.password.as_deref())
            .map_err(|e| PdfError::Open(e.to_string()))
    }

    fn page<'a>(&self, document: &PdfDocument<'a>, index: u32) -> Result<PdfPage<'a>> {
        if index >= self.page_count {
            return Err(PdfError::InvalidPage(index));
        }
        document
            .pages()
            .get(index as u16)
            .map_err(|_| PdfError::InvalidPage(index))
    }
}

impl PdfEngine for PdfiumEngine {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_size(&self, index: u32) -> Result<(f64, f64)> {
        let document = self.document()?;
        let page = self.page(&document, index)?;
        Ok((f64::from(page.width().value), f64::from(page.height().value)))
    }

    fn render_page(&self, index: u32, scale: f32) -> Result<GrayImage> {
        let document = self.document()?;
        let page = self.page(&document, index)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = page.render_with_config(&config).map_err(|e| PdfError::Render {
            page: index,
            reason: e.to_string(),
        })?;

        Ok(bitmap.as_image().to_luma8())
    }

    fn bounded_text(&self, index: u32, rect: &Rect) -> Result<String> {
        let document = self.document()?;
        let page = self.page(&document, index)?;

        let text = page
            .text()
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        // The geometry layer works in (row, column) space; its bounds are
        // handed to pdfium's bounded lookup field-for-field, matching the
        // call the value pipeline was tuned against.
        let bounds = PdfRect::new(
            PdfPoints::new(rect.bottom as f32),
            PdfPoints::new(rect.left as f32),
            PdfPoints::new(rect.top as f32),
            PdfPoints::new(rect.right as f32),
        );

        Ok(text.inside_rect(bounds))
    }
}
