//! Batch conversion pipeline
//!
//! For each PDF: render pages → detect table borders and write crops →
//! keep the pages without a crop as slides → write the deck and the
//! reconstructed PDF. PDFs are processed one after another.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assembly::{PdfWriter, PptxWriter};
use crate::detection::{BorderDetector, BorderRegion};
use crate::error::{ConversionError, Result};
use crate::image_loader::{load_image, save_png};
use crate::layout::{list_pdfs, ProjectLayout};
use crate::render::{PageImage, PageRasterizer};
use crate::PipelineConfig;

/// What happened to one rendered page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOutcome {
    pub page: PageImage,
    /// Detected table region, if any
    pub region: Option<BorderRegion>,
    /// Written table crop; `None` when no region or a zero-area crop
    pub crop_path: Option<PathBuf>,
}

impl PageOutcome {
    pub fn is_cropped(&self) -> bool {
        self.crop_path.is_some()
    }
}

/// Result of converting one PDF
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub project: String,
    pub pages: Vec<PageOutcome>,
    pub pptx_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

impl ConversionReport {
    /// Pages that produced a table crop
    pub fn cropped_pages(&self) -> impl Iterator<Item = &PageOutcome> {
        self.pages.iter().filter(|p| p.is_cropped())
    }

    /// Page images placed in the deck and PDF, in page order
    pub fn slide_images(&self) -> Vec<PathBuf> {
        select_slides(&self.pages)
    }
}

/// Outcome of a whole batch
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<ConversionReport>,
    /// PDFs that failed with a per-file error
    pub failures: Vec<(PathBuf, ConversionError)>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Slides are all rendered pages minus the pages that produced a crop
pub fn select_slides(pages: &[PageOutcome]) -> Vec<PathBuf> {
    pages
        .iter()
        .filter(|outcome| !outcome.is_cropped())
        .map(|outcome| outcome.page.path.clone())
        .collect()
}

/// Detect the table border on one page image and write its crop to `crop_path`
///
/// A crop left over from an earlier run is removed when this run
/// produces none, so the output directory always matches the slide set.
pub fn extract_table(
    detector: &BorderDetector,
    page: &PageImage,
    crop_path: &Path,
) -> Result<PageOutcome> {
    let image = load_image(&page.path)?;
    let region = detector.detect(&image)?;

    let cropped = match &region {
        Some(region) => detector.crop(&image, region)?,
        None => None,
    };

    let crop_path = match cropped {
        Some(table) => {
            save_png(crop_path, &table)?;
            log::info!("Page {}: table cropped to {}", page.page_number, crop_path.display());
            Some(crop_path.to_path_buf())
        }
        None => {
            if let Some(region) = &region {
                log::warn!(
                    "Page {}: border found at {:?} but the {}px margin leaves nothing to crop",
                    page.page_number,
                    region.contour_bounds,
                    detector.border_margin()
                );
            } else {
                log::debug!("Page {}: no table border", page.page_number);
            }
            remove_stale(crop_path)?;
            None
        }
    };

    Ok(PageOutcome {
        page: page.clone(),
        region,
        crop_path,
    })
}

fn remove_stale(path: &Path) -> Result<()> {
    if path.is_file() {
        log::debug!("Removing stale crop {}", path.display());
        fs::remove_file(path).map_err(|e| ConversionError::io(path, e))?;
    }
    Ok(())
}

/// Converts PDFs according to a [`PipelineConfig`]
pub struct Converter {
    rasterizer: PageRasterizer,
    detector: BorderDetector,
    config: PipelineConfig,
}

impl Converter {
    /// Validate the configuration and bind PDFium
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rasterizer: PageRasterizer::new()?,
            detector: BorderDetector::from_config(&config.detection),
            config,
        })
    }

    /// Convert a single PDF
    pub fn convert_pdf(&self, pdf_path: &Path) -> Result<ConversionReport> {
        let layout = ProjectLayout::for_pdf(pdf_path, &self.config)?;
        layout.ensure_dirs()?;

        log::info!("Converting {} ({})", pdf_path.display(), layout.project);
        let pages = self
            .rasterizer
            .render_pages(pdf_path, &layout.pages_dir, self.config.zoom_factor)?;
        log::info!("Rendered {} pages into {}", pages.len(), layout.pages_dir.display());

        let outcomes = process_pages(&self.detector, &pages, &layout)?;
        assemble(&layout, outcomes, &self.config)
    }

    /// Convert every PDF in the content directory
    ///
    /// Per-file failures are collected in the summary; errors that would
    /// affect every file (unreadable content directory, I/O) abort the batch.
    pub fn convert_all(&self) -> Result<BatchSummary> {
        let pdfs = list_pdfs(&self.config.content_dir)?;
        log::info!("Found {} PDF files in {}", pdfs.len(), self.config.content_dir.display());

        let mut summary = BatchSummary::default();
        for pdf in pdfs {
            match self.convert_pdf(&pdf) {
                Ok(report) => summary.reports.push(report),
                Err(e) if e.is_recoverable() => {
                    log::error!("{}: {}", pdf.display(), e);
                    summary.failures.push((pdf, e));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(summary)
    }
}

/// Run table extraction over already rendered pages
pub fn process_pages(
    detector: &BorderDetector,
    pages: &[PageImage],
    layout: &ProjectLayout,
) -> Result<Vec<PageOutcome>> {
    pages
        .iter()
        .map(|page| extract_table(detector, page, &layout.crop_path(&page.path)))
        .collect()
}

/// Write the deck and the reconstructed PDF from the non-table pages
pub fn assemble(
    layout: &ProjectLayout,
    pages: Vec<PageOutcome>,
    config: &PipelineConfig,
) -> Result<ConversionReport> {
    let slides = select_slides(&pages);
    log::info!(
        "{}: {} slides, {} tables",
        layout.project,
        slides.len(),
        pages.len() - slides.len()
    );

    let pptx_path = if config.output.write_pptx {
        let path = layout.pptx_path();
        PptxWriter::from_config(&config.output).write(&slides, &path)?;
        Some(path)
    } else {
        None
    };

    let pdf_path = if !config.output.write_pdf {
        None
    } else if slides.is_empty() {
        log::warn!("{}: every page is a table, skipping the PDF", layout.project);
        None
    } else {
        let path = layout.pdf_path();
        PdfWriter::new().write(&slides, &path)?;
        Some(path)
    };

    Ok(ConversionReport {
        project: layout.project.clone(),
        pages,
        pptx_path,
        pdf_path,
    })
}
