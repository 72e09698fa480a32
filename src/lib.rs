//! # PDF Table Slides
//!
//! Batch-converts PDF decks into slide material.
//!
//! For every PDF in the content directory this crate:
//! - Renders each page to a PNG at a configurable zoom factor
//! - Detects a purple border marking a table and crops the framed content
//! - Keeps the pages without a table as slides
//! - Assembles those slides into a PPTX deck and an image-only PDF
//!
//! ## Example
//!
//! ```rust,no_run
//! use pdf_table_slides::{convert_all, PipelineConfig};
//!
//! let summary = convert_all(&PipelineConfig::default())?;
//! for report in &summary.reports {
//!     println!("{}: {} slides", report.project, report.slide_images().len());
//! }
//! # Ok::<(), pdf_table_slides::ConversionError>(())
//! ```

use std::path::Path;

pub mod assembly;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod image_loader;
pub mod layout;
pub mod pipeline;
pub mod render;

pub use config::{DetectionConfig, OutputConfig, PipelineConfig};
pub use detection::{BorderDetector, BorderRegion, BoundingBox, HsvBand};
pub use error::{ConversionError, Result};
pub use pipeline::{BatchSummary, ConversionReport, Converter, PageOutcome};
pub use render::PageImage;

/// Convert a single PDF with the given configuration
///
/// # Errors
///
/// Returns `ConversionError` if:
/// - The configuration is invalid or PDFium cannot be loaded
/// - The PDF cannot be opened or a page fails to render
/// - A page image or crop cannot be read or written
/// - The deck or the reconstructed PDF cannot be written
pub fn convert_pdf(pdf_path: &Path, config: &PipelineConfig) -> Result<ConversionReport> {
    Converter::new(config.clone())?.convert_pdf(pdf_path)
}

/// Convert every PDF in `config.content_dir`
pub fn convert_all(config: &PipelineConfig) -> Result<BatchSummary> {
    Converter::new(config.clone())?.convert_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization() {
        let report = ConversionReport {
            project: "deck".to_string(),
            pages: vec![PageOutcome {
                page: PageImage {
                    page_number: 1,
                    path: "pages/deck/page_01.png".into(),
                },
                region: Some(BorderRegion::from_bounding_box(
                    BoundingBox::new(100, 80, 300, 200),
                    12,
                    59_501.0,
                )),
                crop_path: Some("content/deck/page_01.png".into()),
            }],
            pptx_path: Some("content/deck/deck.pptx".into()),
            pdf_path: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["project"], "deck");
        assert_eq!(json["pages"][0]["region"]["crop"]["x"], 112);
        assert_eq!(json["pages"][0]["region"]["crop"]["width"], 276);
        assert!(json["pdf_path"].is_null());
    }
}
