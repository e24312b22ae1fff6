//! Configuration for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::RegionFlag;

/// Main configuration for the boleto pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoletoConfig {
    /// Value resolution configuration.
    pub extraction: ExtractionConfig,

    /// OCR fallback configuration.
    pub ocr: OcrConfig,
}

/// Value resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Largest value accepted as a ticket amount; larger candidates are
    /// discarded as codes or identifiers.
    pub ceiling: f64,

    /// Region inspected when resolving the ticket value.
    pub flag: RegionFlag,

    /// Fraction shrinking the inspected region inward from the page
    /// edges, in [0, 0.5).
    pub reduction_percentage: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ceiling: 500_000.0,
            flag: RegionFlag::Right,
            reduction_percentage: 0.2,
        }
    }
}

/// OCR fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition language passed to the OCR backend.
    pub language: String,

    /// Tesseract-style page segmentation mode; 6 treats the region as a
    /// single uniform block of text.
    pub page_segmentation_mode: u32,

    /// Scale factor applied when rasterizing a region for OCR.
    pub render_scale: f32,

    /// Tesseract data directory, when not using the system default.
    pub data_path: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "por".to_string(),
            page_segmentation_mode: 6,
            render_scale: 4.0,
            data_path: None,
        }
    }
}

impl BoletoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
