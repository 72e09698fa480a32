//! PDF page rasterization
//!
//! Pages are rendered with PDFium and stored as PNG files named
//! `page_NN.png`, one per page, in page order.

pub mod rasterizer;

pub use rasterizer::{bind_pdfium, PageImage, PageRasterizer};
