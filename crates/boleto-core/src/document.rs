//! Ticket document orchestration: layered text extraction and value
//! resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::{debug, warn};

use crate::config::BoletoConfig;
use crate::error::{DocumentError, Result};
use crate::geometry::{flag_rect, Rect, RegionFlag};
use crate::ocr::OcrBackend;
use crate::pdf::PdfEngine;
use crate::quality;
use crate::values::{self, Locale};

/// Separator inserted between page texts.
const PAGE_SEPARATOR: &str = "\n~-~-~\n~-~-~\n";

/// How the last text extraction obtained its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// No extraction attempted yet.
    #[default]
    None,
    /// Native text layer only.
    Text,
    /// Native text layer with OCR fallback on at least one page.
    TextOcr,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::None => f.write_str("none"),
            ExtractionMode::Text => f.write_str("text"),
            ExtractionMode::TextOcr => f.write_str("text/ocr"),
        }
    }
}

/// An opened payment-ticket document.
///
/// Owns the PDF engine and the injected OCR backend for its whole
/// lifetime; the underlying PDF handle is released when the document is
/// dropped. Not designed for concurrent use, one document per execution
/// context.
pub struct TicketDocument {
    engine: Box<dyn PdfEngine>,
    ocr: Box<dyn OcrBackend>,
    config: BoletoConfig,
    path: Option<PathBuf>,
    file_size_mb: f64,
    extraction_mode: ExtractionMode,
}

impl TicketDocument {
    /// Open a ticket from a PDF file on disk.
    ///
    /// Fails with [`DocumentError::FileNotFound`] when the path is not a
    /// file and [`DocumentError::UnsupportedExtension`] for anything but
    /// `.pdf`.
    #[cfg(feature = "pdfium")]
    pub fn open(
        path: impl AsRef<Path>,
        password: Option<&str>,
        ocr: Box<dyn OcrBackend>,
    ) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(DocumentError::FileNotFound(path.to_path_buf()).into());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if extension != "pdf" {
            return Err(DocumentError::UnsupportedExtension(extension).into());
        }

        let data = std::fs::read(path)?;
        let file_size_mb = data.len() as f64 / f64::from(1024 * 1024);
        let engine = crate::pdf::PdfiumEngine::from_bytes(data, password)?;

        Ok(Self {
            engine: Box::new(engine),
            ocr,
            config: BoletoConfig::default(),
            path: Some(path.to_path_buf()),
            file_size_mb,
            extraction_mode: ExtractionMode::None,
        })
    }

    /// Build a document over an already-opened engine. Used by tests and
    /// by callers that manage the PDF engine themselves.
    pub fn from_engine(engine: Box<dyn PdfEngine>, ocr: Box<dyn OcrBackend>) -> Self {
        Self {
            engine,
            ocr,
            config: BoletoConfig::default(),
            path: None,
            file_size_mb: 0.0,
            extraction_mode: ExtractionMode::None,
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: BoletoConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.engine.page_count()
    }

    /// Page size in points, as `(width, height)`.
    pub fn page_size(&self, page: u32) -> Result<(f64, f64)> {
        Ok(self.engine.page_size(page)?)
    }

    /// Source file size in megabytes, 0 when the document was not opened
    /// from a file.
    pub fn file_size_mb(&self) -> f64 {
        self.file_size_mb
    }

    /// Source path, when the document was opened from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// How the last `text` call obtained its result.
    ///
    /// [`ExtractionMode::None`] when no extraction was attempted yet.
    pub fn last_extraction_mode(&self) -> ExtractionMode {
        self.extraction_mode
    }

    /// Whether every index in `pages` exists in the document.
    pub fn pages_exist(&self, pages: &[u32]) -> bool {
        self.missing_pages(pages).is_empty()
    }

    fn missing_pages(&self, pages: &[u32]) -> Vec<u32> {
        let count = self.engine.page_count();
        pages.iter().copied().filter(|&p| p >= count).collect()
    }

    /// Rasterize the selected region of a page as an 8-bit grayscale
    /// image.
    ///
    /// One pixel is trimmed off each raster axis before the flag
    /// rectangle is computed, so a composed bound can never step past the
    /// raster edge.
    pub fn render(
        &self,
        page: u32,
        flag: RegionFlag,
        scale: f32,
        reduction: f64,
    ) -> Result<GrayImage> {
        let image = self.engine.render_page(page, scale)?;

        let rows = f64::from(image.height().saturating_sub(1));
        let cols = f64::from(image.width().saturating_sub(1));
        let rect = flag_rect(flag, (rows, cols), reduction)?;

        Ok(crop(&image, &rect))
    }

    /// Extract text for `pages` (all pages when `None`) restricted to the
    /// flag's region, joined with a fixed separator.
    ///
    /// Per page the native text layer is tried first; when it fails the
    /// quality gate and OCR is allowed, the region is rasterized and
    /// recognized instead. `force_ocr` skips the native layer entirely
    /// and implies `allow_ocr`. A combined result that still fails the
    /// gate is returned as-is with a warning, never an error.
    pub fn text(
        &mut self,
        pages: Option<&[u32]>,
        flag: RegionFlag,
        allow_ocr: bool,
        force_ocr: bool,
        reduction: f64,
    ) -> Result<String> {
        let all_pages: Vec<u32>;
        let pages: &[u32] = match pages {
            Some(pages) => pages,
            None => {
                all_pages = (0..self.engine.page_count()).collect();
                &all_pages
            }
        };
        let allow_ocr = allow_ocr || force_ocr;

        let mut chunks = Vec::with_capacity(pages.len());
        let mut used_ocr = false;

        for &page in pages {
            let (text, page_used_ocr) =
                self.page_text(page, flag, allow_ocr, force_ocr, reduction)?;
            used_ocr |= page_used_ocr;
            chunks.push(text);
        }

        let combined = chunks.join(PAGE_SEPARATOR);

        if !quality::is_usable(&combined) {
            if allow_ocr {
                warn!("failed to extract ticket text");
            } else {
                warn!("failed to extract ticket text, OCR may help");
            }
        }

        self.extraction_mode = if used_ocr {
            ExtractionMode::TextOcr
        } else {
            ExtractionMode::Text
        };

        Ok(combined)
    }

    /// Text for one page's region, with the layered strategy: native text
    /// layer first unless forced, then the OCR fallback when the result
    /// fails the quality gate and OCR is allowed. Returns the text and
    /// whether OCR produced it.
    fn page_text(
        &self,
        page: u32,
        flag: RegionFlag,
        allow_ocr: bool,
        force_ocr: bool,
        reduction: f64,
    ) -> Result<(String, bool)> {
        let mut text = String::new();

        if !force_ocr {
            let (width, height) = self.engine.page_size(page)?;
            // Page size arrives as (width, height); geometry wants
            // (rows, cols).
            let rect = flag_rect(flag, (height, width), reduction)?;
            text = self.engine.bounded_text(page, &rect)?;
        }

        if quality::is_usable(&text) || !allow_ocr {
            return Ok((text, false));
        }

        debug!(page, "native text failed the quality gate, falling back to OCR");
        let region = self.render(page, flag, self.config.ocr.render_scale, reduction)?;
        let text = self.ocr.recognize(
            &region,
            &self.config.ocr.language,
            self.config.ocr.page_segmentation_mode,
        )?;

        Ok((text, true))
    }

    /// Resolve the ticket's monetary value.
    ///
    /// Runs up to two extraction passes over the configured region,
    /// natural first and forced OCR second, trying the br then us locale
    /// on each; the first locale that yields any candidate under
    /// `ceiling` wins and its maximum is returned truncated to 2
    /// decimals. The forced pass is skipped when the last extraction
    /// already used OCR. `Ok(None)` means no value was found, an expected
    /// outcome rather than a fault.
    pub fn ticket_value(
        &mut self,
        pages: Option<&[u32]>,
        ceiling: f64,
        allow_ocr: bool,
    ) -> Result<Option<f64>> {
        if let Some(requested) = pages {
            let missing = self.missing_pages(requested);
            if !missing.is_empty() {
                return Err(DocumentError::PagesNotFound(missing).into());
            }
        }

        let flag = self.config.extraction.flag;
        let reduction = self.config.extraction.reduction_percentage;

        for force_ocr in [false, true] {
            if force_ocr && self.extraction_mode == ExtractionMode::TextOcr {
                break;
            }

            let text = self.text(pages, flag, allow_ocr, force_ocr, reduction)?;

            for locale in Locale::ALL {
                let best = values::extract_candidates(&text, locale)
                    .into_iter()
                    .filter(|&v| v <= ceiling)
                    .max_by(|a, b| a.total_cmp(b));

                if let Some(best) = best {
                    debug!(%locale, value = best, "resolved ticket value");
                    return Ok(Some(values::truncate(best, 2)));
                }
            }
        }

        Ok(None)
    }
}

impl fmt::Debug for TicketDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketDocument")
            .field("path", &self.path)
            .field("pages", &self.engine.page_count())
            .field("file_size_mb", &self.file_size_mb)
            .field("extraction_mode", &self.extraction_mode)
            .finish()
    }
}

/// Crop a raster to a rectangle, resolving negative bounds against the
/// raster's actual dimensions.
fn crop(image: &GrayImage, rect: &Rect) -> GrayImage {
    let ((top, bottom), (left, right)) = rect.resolve(image.height(), image.width());
    image::imageops::crop_imm(image, left, top, right - left, bottom - top).to_image()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::{BoletoError, OcrError, PdfError};
    use crate::ocr::MockRecognizer;
    use pretty_assertions::assert_eq;

    /// In-memory engine serving preset per-page text over a fixed page
    /// size.
    struct FakeEngine {
        page_texts: Vec<String>,
        size: (f64, f64),
        bounded_calls: Rc<Cell<usize>>,
    }

    impl FakeEngine {
        fn new(page_texts: &[&str]) -> (Self, Rc<Cell<usize>>) {
            let bounded_calls = Rc::new(Cell::new(0));
            let engine = Self {
                page_texts: page_texts.iter().map(|t| t.to_string()).collect(),
                size: (595.0, 842.0),
                bounded_calls: Rc::clone(&bounded_calls),
            };
            (engine, bounded_calls)
        }
    }

    impl PdfEngine for FakeEngine {
        fn page_count(&self) -> u32 {
            self.page_texts.len() as u32
        }

        fn page_size(&self, index: u32) -> crate::pdf::Result<(f64, f64)> {
            if index as usize >= self.page_texts.len() {
                return Err(PdfError::InvalidPage(index));
            }
            Ok(self.size)
        }

        fn render_page(&self, index: u32, scale: f32) -> crate::pdf::Result<GrayImage> {
            if index as usize >= self.page_texts.len() {
                return Err(PdfError::InvalidPage(index));
            }
            let (width, height) = self.size;
            Ok(GrayImage::new(
                (width * f64::from(scale)) as u32,
                (height * f64::from(scale)) as u32,
            ))
        }

        fn bounded_text(&self, index: u32, _rect: &Rect) -> crate::pdf::Result<String> {
            self.bounded_calls.set(self.bounded_calls.get() + 1);
            self.page_texts
                .get(index as usize)
                .cloned()
                .ok_or(PdfError::InvalidPage(index))
        }
    }

    /// OCR backend returning a preset string and counting invocations.
    struct CountingOcr {
        text: String,
        calls: Rc<Cell<usize>>,
    }

    impl CountingOcr {
        fn new(text: &str) -> (Self, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            let ocr = Self {
                text: text.to_string(),
                calls: Rc::clone(&calls),
            };
            (ocr, calls)
        }
    }

    impl OcrBackend for CountingOcr {
        fn recognize(
            &self,
            _image: &GrayImage,
            _lang: &str,
            _psm: u32,
        ) -> crate::ocr::Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.text.clone())
        }
    }

    fn document(page_texts: &[&str]) -> TicketDocument {
        let (engine, _) = FakeEngine::new(page_texts);
        TicketDocument::from_engine(Box::new(engine), Box::new(MockRecognizer::new("")))
    }

    const GARBAGE: &str = "\u{1}\u{2}\u{3}\u{4}";

    #[test]
    fn resolves_value_from_native_text() {
        let mut doc = document(&["Valor: 1.500,00"]);

        let value = doc.ticket_value(None, 500_000.0, false).unwrap();

        assert_eq!(value, Some(1500.0));
        assert_eq!(doc.last_extraction_mode(), ExtractionMode::Text);
    }

    #[test]
    fn value_is_truncated_not_rounded() {
        let mut doc = document(&["Total 1500,005"]);

        let value = doc.ticket_value(None, 500_000.0, false).unwrap();

        assert_eq!(value, Some(1500.0));
    }

    #[test]
    fn ceiling_discards_large_candidates() {
        let mut doc = document(&["codigo 9.999.999,99 valor 1.500,00"]);

        let value = doc.ticket_value(None, 500_000.0, false).unwrap();

        assert_eq!(value, Some(1500.0));
    }

    #[test]
    fn picks_maximum_candidate_under_ceiling() {
        let mut doc = document(&["juros 12,34 valor 1.500,00 desconto 2,00"]);

        let value = doc.ticket_value(None, 500_000.0, false).unwrap();

        assert_eq!(value, Some(1500.0));
    }

    #[test]
    fn br_locale_wins_over_us_on_ambiguous_text() {
        // br reads 1234.56; us would read 1.23456.
        let mut doc = document(&["1.234,56"]);

        let value = doc.ticket_value(None, 500_000.0, false).unwrap();

        assert_eq!(value, Some(1234.56));
    }

    #[test]
    fn no_candidates_is_none_not_an_error() {
        let mut doc = document(&["nothing of interest here"]);

        let value = doc.ticket_value(None, 500_000.0, false).unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn missing_pages_fail_before_any_extraction() {
        let (engine, bounded_calls) = FakeEngine::new(&["page one", "page two"]);
        let mut doc =
            TicketDocument::from_engine(Box::new(engine), Box::new(MockRecognizer::new("")));

        let err = doc.ticket_value(Some(&[0, 5, 9]), 500_000.0, false).unwrap_err();

        match err {
            BoletoError::Document(DocumentError::PagesNotFound(missing)) => {
                assert_eq!(missing, vec![5, 9]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(bounded_calls.get(), 0);
        assert_eq!(doc.last_extraction_mode(), ExtractionMode::None);
    }

    #[test]
    fn quality_failure_falls_back_to_ocr() {
        let (engine, _) = FakeEngine::new(&[GARBAGE]);
        let (ocr, ocr_calls) = CountingOcr::new("Valor: 1.500,00");
        let mut doc = TicketDocument::from_engine(Box::new(engine), Box::new(ocr));

        let value = doc.ticket_value(None, 500_000.0, true).unwrap();

        assert_eq!(value, Some(1500.0));
        assert_eq!(ocr_calls.get(), 1);
        assert_eq!(doc.last_extraction_mode(), ExtractionMode::TextOcr);
    }

    #[test]
    fn forced_pass_is_skipped_after_ocr_already_ran() {
        // Native text fails the gate, so the first pass already falls
        // back to OCR; the forced second pass would repeat the exact same
        // work and is skipped.
        let (engine, _) = FakeEngine::new(&[GARBAGE]);
        let (ocr, ocr_calls) = CountingOcr::new("no numbers in sight");
        let mut doc = TicketDocument::from_engine(Box::new(engine), Box::new(ocr));

        let value = doc.ticket_value(None, 500_000.0, true).unwrap();

        assert_eq!(value, None);
        assert_eq!(ocr_calls.get(), 1);
        assert_eq!(doc.last_extraction_mode(), ExtractionMode::TextOcr);
    }

    #[test]
    fn forced_pass_runs_when_first_pass_stayed_native() {
        let (engine, _) = FakeEngine::new(&["legible but valueless"]);
        let (ocr, ocr_calls) = CountingOcr::new("Valor: 42,50");
        let mut doc = TicketDocument::from_engine(Box::new(engine), Box::new(ocr));

        let value = doc.ticket_value(None, 500_000.0, false).unwrap();

        assert_eq!(value, Some(42.5));
        assert_eq!(ocr_calls.get(), 1);
        assert_eq!(doc.last_extraction_mode(), ExtractionMode::TextOcr);
    }

    #[test]
    fn text_joins_pages_with_fixed_separator() {
        let mut doc = document(&["first page", "second page"]);

        let text = doc
            .text(None, RegionFlag::All, false, false, 0.0)
            .unwrap();

        assert_eq!(text, "first page\n~-~-~\n~-~-~\nsecond page");
        assert_eq!(doc.last_extraction_mode(), ExtractionMode::Text);
    }

    #[test]
    fn text_honors_explicit_page_selection() {
        let mut doc = document(&["first", "second", "third"]);

        let text = doc
            .text(Some(&[2]), RegionFlag::All, false, false, 0.0)
            .unwrap();

        assert_eq!(text, "third");
    }

    #[test]
    fn low_quality_text_is_returned_not_rejected() {
        let mut doc = document(&[GARBAGE]);

        let text = doc
            .text(None, RegionFlag::All, false, false, 0.0)
            .unwrap();

        assert_eq!(text, GARBAGE);
    }

    #[test]
    fn force_ocr_skips_the_native_layer() {
        let (engine, bounded_calls) = FakeEngine::new(&["Valor: 99,00"]);
        let (ocr, ocr_calls) = CountingOcr::new("Valor: 11,00");
        let mut doc = TicketDocument::from_engine(Box::new(engine), Box::new(ocr));

        let text = doc
            .text(None, RegionFlag::Right, false, true, 0.2)
            .unwrap();

        assert_eq!(text, "Valor: 11,00");
        assert_eq!(bounded_calls.get(), 0);
        assert_eq!(ocr_calls.get(), 1);
        assert_eq!(doc.last_extraction_mode(), ExtractionMode::TextOcr);
    }

    #[test]
    fn ocr_error_propagates_when_forced() {
        let (engine, _) = FakeEngine::new(&["usable text"]);
        let mut doc = TicketDocument::from_engine(
            Box::new(engine),
            Box::new(crate::ocr::DisabledOcr),
        );

        let err = doc
            .text(None, RegionFlag::All, false, true, 0.0)
            .unwrap_err();

        assert!(matches!(err, BoletoError::Ocr(OcrError::NotAvailable)));
    }

    #[test]
    fn render_crops_to_the_flag_region() {
        let (engine, _) = FakeEngine::new(&["ignored"]);
        let doc =
            TicketDocument::from_engine(Box::new(engine), Box::new(MockRecognizer::new("")));

        // Raster is 595x842; geometry sees 594x841 and composes
        // quadrant 1 as rows [0, 420), cols [297, 594).
        let region = doc.render(0, RegionFlag::Quadrant1, 1.0, 0.0).unwrap();

        assert_eq!((region.width(), region.height()), (297, 420));
    }

    #[test]
    fn extraction_mode_displays_like_the_report() {
        assert_eq!(ExtractionMode::None.to_string(), "none");
        assert_eq!(ExtractionMode::Text.to_string(), "text");
        assert_eq!(ExtractionMode::TextOcr.to_string(), "text/ocr");
    }
}
