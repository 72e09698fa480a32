//! Output assembly
//!
//! Builds the final artifacts from the slide images (pages without a
//! table crop): a PPTX deck with one full-height picture per slide, and a
//! PDF with one full-bleed image per page.

pub mod pdf;
pub mod pptx;

pub use pdf::PdfWriter;
pub use pptx::PptxWriter;
