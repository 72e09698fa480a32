//! Configuration structures for the PDF to slide conversion pipeline.
//!
//! All tunable parameters are grouped into rendering/layout settings,
//! border detection settings and output settings. The defaults reproduce
//! the hard-coded behavior of the batch converter.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use pdf_table_slides::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("slides.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), pdf_table_slides::ConversionError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{border, deck, layout, render};
use crate::detection::HsvBand;
use crate::error::{ConversionError, Result};

/// Complete pipeline configuration.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the input PDFs; crops and outputs land in `<content_dir>/<project>`
    pub content_dir: PathBuf,

    /// Directory receiving rendered pages in `<pages_dir>/<project>`
    pub pages_dir: PathBuf,

    /// Rasterization scale (1.0 = 72 DPI)
    pub zoom_factor: f32,

    /// Border detection configuration
    pub detection: DetectionConfig,

    /// Output configuration
    pub output: OutputConfig,
}

/// Border detection parameters.
///
/// HSV bounds use OpenCV's 8-bit convention: hue 0-180, saturation and
/// value 0-255. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub hue_min: u8,
    pub hue_max: u8,
    pub saturation_min: u8,
    pub saturation_max: u8,
    pub value_min: u8,
    pub value_max: u8,

    /// Contours with an area at or below this value are ignored
    pub min_contour_area: f64,

    /// Pixels trimmed from each side of the detected bounding box
    pub border_margin: i32,
}

/// Artifact toggles and slide geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write `<project>.pptx`
    pub write_pptx: bool,

    /// Write the reconstructed `<project>.pdf`
    pub write_pdf: bool,

    /// Slide width in EMU
    pub slide_width_emu: i64,

    /// Slide height in EMU; pictures are scaled to this height
    pub slide_height_emu: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(layout::CONTENT_DIR),
            pages_dir: PathBuf::from(layout::PAGES_DIR),
            zoom_factor: render::ZOOM_FACTOR,
            detection: DetectionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            hue_min: border::HUE_MIN,
            hue_max: border::HUE_MAX,
            saturation_min: border::SATURATION_MIN,
            saturation_max: border::SATURATION_MAX,
            value_min: border::VALUE_MIN,
            value_max: border::VALUE_MAX,
            min_contour_area: border::MIN_CONTOUR_AREA,
            border_margin: border::MARGIN,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_pptx: true,
            write_pdf: true,
            slide_width_emu: deck::SLIDE_WIDTH_EMU,
            slide_height_emu: deck::SLIDE_HEIGHT_EMU,
        }
    }
}

impl DetectionConfig {
    /// HSV band described by this configuration
    pub fn band(&self) -> HsvBand {
        HsvBand::new(
            [self.hue_min, self.saturation_min, self.value_min],
            [self.hue_max, self.saturation_max, self.value_max],
        )
    }
}

impl PipelineConfig {
    /// Check parameter ranges before any file is touched
    pub fn validate(&self) -> Result<()> {
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 0.0 {
            return Err(ConversionError::invalid_parameter(
                "zoom_factor",
                self.zoom_factor,
            ));
        }

        let d = &self.detection;
        if d.hue_max > border::HUE_LIMIT {
            return Err(ConversionError::invalid_parameter("hue_max", d.hue_max));
        }
        for (name, min, max) in [
            ("hue", d.hue_min, d.hue_max),
            ("saturation", d.saturation_min, d.saturation_max),
            ("value", d.value_min, d.value_max),
        ] {
            if min > max {
                return Err(ConversionError::invalid_parameter(
                    format!("{}_min", name),
                    format!("{} (greater than {}_max {})", min, name, max),
                ));
            }
        }
        if !d.min_contour_area.is_finite() || d.min_contour_area < 0.0 {
            return Err(ConversionError::invalid_parameter(
                "min_contour_area",
                d.min_contour_area,
            ));
        }
        if d.border_margin < 0 {
            return Err(ConversionError::invalid_parameter(
                "border_margin",
                d.border_margin,
            ));
        }

        if self.output.slide_width_emu <= 0 {
            return Err(ConversionError::invalid_parameter(
                "slide_width_emu",
                self.output.slide_width_emu,
            ));
        }
        if self.output.slide_height_emu <= 0 {
            return Err(ConversionError::invalid_parameter(
                "slide_height_emu",
                self.output.slide_height_emu,
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConversionError::io(path, e))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ConversionError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConversionError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| ConversionError::io(path, e))?;
        Ok(())
    }
}
