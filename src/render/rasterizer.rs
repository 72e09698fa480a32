//! Page rasterizer built on pdfium-render.
//!
//! Note: `Pdfium` is not Send+Sync, so a rasterizer is created and used on
//! a single thread for the whole batch.

use image::ImageFormat;
use pdfium_render::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConversionError, Result};
use crate::layout::page_file_name;

/// A rendered page stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageImage {
    /// 1-based page number in the source PDF
    pub page_number: usize,
    /// PNG file of the rendered page
    pub path: PathBuf,
}

impl PageImage {
    /// File name of the page image (`page_NN.png`)
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| page_file_name(self.page_number))
    }
}

/// Bind to the PDFium library.
///
/// Looks next to the executable first, then in the working directory, then
/// falls back to the system library.
pub fn bind_pdfium() -> Result<Pdfium> {
    let mut attempts: Vec<String> = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        let exe_dir = exe_dir.to_string_lossy();
        let candidate = Pdfium::pdfium_platform_library_name_at_path(&*exe_dir);
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                log::debug!("Loaded PDFium from {:?}", candidate);
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => attempts.push(format!("{:?}: {}", candidate, e)),
        }
    }

    let local = Pdfium::pdfium_platform_library_name_at_path("./");
    match Pdfium::bind_to_library(&local) {
        Ok(bindings) => {
            log::debug!("Loaded PDFium from {:?}", local);
            return Ok(Pdfium::new(bindings));
        }
        Err(e) => attempts.push(format!("{:?}: {}", local, e)),
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            log::debug!("Loaded system PDFium library");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            attempts.push(format!("system library: {}", e));
            Err(ConversionError::PdfiumBindError {
                message: attempts.join("; "),
            })
        }
    }
}

/// Renders every page of a PDF to PNG files
pub struct PageRasterizer {
    pdfium: Pdfium,
}

impl PageRasterizer {
    /// Create a rasterizer bound to the PDFium library
    pub fn new() -> Result<Self> {
        Ok(Self {
            pdfium: bind_pdfium()?,
        })
    }

    /// Number of pages in the PDF
    pub fn page_count(&self, pdf_path: &Path) -> Result<usize> {
        let document = self.open(pdf_path)?;
        Ok(document.pages().len() as usize)
    }

    /// Render all pages of `pdf_path` into `out_dir` as `page_NN.png`
    ///
    /// Each page is rendered at its size in points multiplied by `zoom`
    /// (1.0 = 72 DPI). Existing page images are overwritten.
    pub fn render_pages(
        &self,
        pdf_path: &Path,
        out_dir: &Path,
        zoom: f32,
    ) -> Result<Vec<PageImage>> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ConversionError::invalid_parameter("zoom_factor", zoom));
        }

        let document = self.open(pdf_path)?;
        let render_config = PdfRenderConfig::new()
            .scale_page_by_factor(zoom)
            .render_form_data(true)
            .render_annotations(true);

        let mut pages = Vec::with_capacity(document.pages().len() as usize);

        for (index, page) in document.pages().iter().enumerate() {
            let page_number = index + 1;

            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                ConversionError::PdfRenderError {
                    message: format!(
                        "{} page {}: {}",
                        pdf_path.display(),
                        page_number,
                        e
                    ),
                }
            })?;

            // PNG pages carry no alpha channel
            let rgb = bitmap.as_image().to_rgb8();
            let path = out_dir.join(page_file_name(page_number));

            rgb.save_with_format(&path, ImageFormat::Png).map_err(|e| {
                ConversionError::image_write(format!("Failed to save {}", path.display()), e)
            })?;

            log::debug!(
                "Rendered page {} ({}x{}) to {}",
                page_number,
                rgb.width(),
                rgb.height(),
                path.display()
            );
            pages.push(PageImage { page_number, path });
        }

        Ok(pages)
    }

    fn open(&self, pdf_path: &Path) -> Result<PdfDocument<'_>> {
        self.pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| ConversionError::PdfRenderError {
                message: format!("{}: {}", pdf_path.display(), e),
            })
    }
}
