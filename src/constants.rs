//! Default parameters for rendering, border detection and deck layout
//!
//! Every value here is the hard-coded default of the batch converter; a
//! JSON [`PipelineConfig`](crate::PipelineConfig) can override them.

/// Table border color band in OpenCV HSV units
///
/// OpenCV stores hue as degrees / 2 (0-180) and saturation/value as 0-255.
/// Hue 120-150 covers blue-violet through magenta (240°-300°).
pub mod border {
    /// Lower hue bound (inclusive)
    pub const HUE_MIN: u8 = 120;
    /// Upper hue bound (inclusive)
    pub const HUE_MAX: u8 = 150;

    pub const SATURATION_MIN: u8 = 40;
    pub const SATURATION_MAX: u8 = 255;

    pub const VALUE_MIN: u8 = 40;
    pub const VALUE_MAX: u8 = 255;

    /// Contours with area at or below this are treated as noise (pixels²)
    pub const MIN_CONTOUR_AREA: f64 = 100.0;

    /// Pixels removed from every side of the bounding box to drop the border stroke
    pub const MARGIN: i32 = 12;

    /// Largest value of the OpenCV 8-bit hue channel
    pub const HUE_LIMIT: u8 = 180;
}

/// Page rasterization
pub mod render {
    /// Scale applied to the page size in points (1.0 = 72 DPI)
    pub const ZOOM_FACTOR: f32 = 3.0;
}

/// Presentation geometry
pub mod deck {
    /// English Metric Units per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// Default 4:3 slide width (10 in)
    pub const SLIDE_WIDTH_EMU: i64 = 10 * EMU_PER_INCH;

    /// Default 4:3 slide height (7.5 in)
    pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;
}

/// Directory and file naming
pub mod layout {
    /// Directory holding the input PDFs and receiving crops and final outputs
    pub const CONTENT_DIR: &str = "content";

    /// Directory receiving the rendered page images
    pub const PAGES_DIR: &str = "pages";

    /// Prefix of every rendered page image
    pub const PAGE_PREFIX: &str = "page_";

    pub const PDF_EXTENSION: &str = "pdf";
    pub const PNG_EXTENSION: &str = "png";
    pub const PPTX_EXTENSION: &str = "pptx";
}
