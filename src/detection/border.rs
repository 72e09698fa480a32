//! Colored border detection and table cropping
//!
//! Locates the region framed by a colored (purple by default) border:
//! - Thresholds the page in HSV space into a binary mask
//! - Extracts external contours of the mask
//! - Drops contours whose area does not exceed the noise floor
//! - Takes the bounding box of the largest remaining contour
//! - Shrinks the box by a fixed margin so the border stroke is excluded
//!
//! At most one region is reported per page.

use opencv::{
    core::{in_range, AlgorithmHint, Mat, Point, Rect, Vector, CV_8UC3},
    imgproc::{
        bounding_rect, contour_area, cvt_color, find_contours, CHAIN_APPROX_SIMPLE,
        COLOR_BGR2HSV, RETR_EXTERNAL,
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use super::HsvBand;
use crate::config::DetectionConfig;
use crate::constants::border;
use crate::{ConversionError, Result};

type VectorOfPoint = Vector<Point>;

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

impl From<BoundingBox> for Rect {
    fn from(bbox: BoundingBox) -> Self {
        Rect::new(bbox.x, bbox.y, bbox.width, bbox.height)
    }
}

/// Table region found on a page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderRegion {
    /// Crop rectangle: the contour bounding box shrunk by the margin
    pub crop: BoundingBox,
    /// Bounding box of the selected contour
    pub contour_bounds: BoundingBox,
    /// Area of the selected contour
    pub contour_area: f64,
}

impl BorderRegion {
    /// Shrink a contour bounding box by `margin` on each side.
    ///
    /// Origin and size are clamped at zero independently, so a margin larger
    /// than half the box collapses the crop to zero area.
    pub fn from_bounding_box(bounds: BoundingBox, margin: i32, contour_area: f64) -> Self {
        let both_sides = margin.saturating_mul(2);
        let crop = BoundingBox {
            x: bounds.x.saturating_add(margin).max(0),
            y: bounds.y.saturating_add(margin).max(0),
            width: bounds.width.saturating_sub(both_sides).max(0),
            height: bounds.height.saturating_sub(both_sides).max(0),
        };
        Self {
            crop,
            contour_bounds: bounds,
            contour_area,
        }
    }

    /// Crop rectangle restricted to a `width` x `height` image
    pub fn clamp_to(&self, width: i32, height: i32) -> BoundingBox {
        let x0 = self.crop.x.clamp(0, width.max(0));
        let y0 = self.crop.y.clamp(0, height.max(0));
        let x1 = (self.crop.x.saturating_add(self.crop.width)).clamp(x0, width.max(x0));
        let y1 = (self.crop.y.saturating_add(self.crop.height)).clamp(y0, height.max(y0));
        BoundingBox::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// True when the crop rectangle has no pixels
    pub fn is_empty(&self) -> bool {
        self.crop.is_empty()
    }
}

/// Detector for colored table borders
#[derive(Debug, Clone)]
pub struct BorderDetector {
    band: HsvBand,
    min_contour_area: f64,
    border_margin: i32,
}

impl Default for BorderDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl BorderDetector {
    /// Create a detector for the default purple border
    pub fn new() -> Self {
        Self {
            band: HsvBand::purple(),
            min_contour_area: border::MIN_CONTOUR_AREA,
            border_margin: border::MARGIN,
        }
    }

    /// Create a detector with custom parameters
    pub fn with_params(band: HsvBand, min_contour_area: f64, border_margin: i32) -> Self {
        Self {
            band,
            min_contour_area,
            border_margin,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::with_params(config.band(), config.min_contour_area, config.border_margin)
    }

    pub fn band(&self) -> &HsvBand {
        &self.band
    }

    pub fn border_margin(&self) -> i32 {
        self.border_margin
    }

    /// Binary mask (255 = inside the color band) of a BGR image
    pub fn color_mask(&self, image: &Mat) -> Result<Mat> {
        if image.empty() {
            return Err(ConversionError::invalid_parameter("image", "empty Mat"));
        }
        if image.typ() != CV_8UC3 {
            return Err(ConversionError::invalid_parameter(
                "image",
                format!("Mat type {} (expected 8-bit BGR)", image.typ()),
            ));
        }

        let mut hsv = Mat::default();
        cvt_color(image, &mut hsv, COLOR_BGR2HSV, 0, AlgorithmHint::ALGO_HINT_DEFAULT)
            .map_err(|e| ConversionError::opencv("HSV conversion", e))?;

        let mut mask = Mat::default();
        in_range(
            &hsv,
            &self.band.lower_scalar(),
            &self.band.upper_scalar(),
            &mut mask,
        )
        .map_err(|e| ConversionError::opencv("Color thresholding", e))?;

        Ok(mask)
    }

    /// Locate the bordered region of a BGR page image
    ///
    /// Returns `Ok(None)` when no contour of the border color exceeds the
    /// noise floor.
    pub fn detect(&self, image: &Mat) -> Result<Option<BorderRegion>> {
        let mask = self.color_mask(image)?;

        let Some((contour, area)) = self.largest_contour(&mask)? else {
            return Ok(None);
        };

        let bounds: BoundingBox = bounding_rect(&contour)
            .map_err(|e| ConversionError::opencv("Bounding box", e))?
            .into();

        let region = BorderRegion::from_bounding_box(bounds, self.border_margin, area);
        log::debug!(
            "Border contour area {:.0} at {:?}, crop {:?}",
            area,
            region.contour_bounds,
            region.crop
        );
        Ok(Some(region))
    }

    /// Cut the region out of the image
    ///
    /// Returns `Ok(None)` when the crop, clamped to the image, has zero area.
    pub fn crop(&self, image: &Mat, region: &BorderRegion) -> Result<Option<Mat>> {
        let bounds = region.clamp_to(image.cols(), image.rows());
        if bounds.is_empty() {
            return Ok(None);
        }

        let roi = Mat::roi(image, bounds.into())
            .map_err(|e| ConversionError::opencv("Region of interest", e))?;
        let mut cropped = Mat::default();
        roi.copy_to(&mut cropped)
            .map_err(|e| ConversionError::opencv("Crop copy", e))?;

        Ok(Some(cropped))
    }

    /// Largest external contour above the noise floor; the first one found wins ties
    fn largest_contour(&self, mask: &Mat) -> Result<Option<(VectorOfPoint, f64)>> {
        let mut contours = Vector::<VectorOfPoint>::new();
        find_contours(
            mask,
            &mut contours,
            RETR_EXTERNAL,
            CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .map_err(|e| ConversionError::opencv("Contour detection", e))?;

        let mut best: Option<(VectorOfPoint, f64)> = None;

        for contour in contours.iter() {
            let area = contour_area(&contour, false)
                .map_err(|e| ConversionError::opencv("Contour area", e))?;

            if area <= self.min_contour_area {
                continue;
            }
            if best.as_ref().map_or(true, |(_, best_area)| area > *best_area) {
                best = Some((contour, area));
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use opencv::core::{Scalar, Vec3b};
    use opencv::imgproc::{rectangle, FILLED, LINE_8};

    /// BGR purple: hue 139, saturation 255, value 200 in OpenCV HSV
    pub(crate) fn purple() -> Scalar {
        Scalar::new(200.0, 0.0, 128.0, 0.0)
    }

    fn white() -> Scalar {
        Scalar::all(255.0)
    }

    pub(crate) fn blank_page(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(height, width, CV_8UC3, white()).unwrap()
    }

    pub(crate) fn fill(image: &mut Mat, rect: Rect, color: Scalar) {
        rectangle(image, rect, color, FILLED, LINE_8, 0).unwrap();
    }

    /// Hollow frame with the given outer rectangle and stroke width
    pub(crate) fn draw_frame(image: &mut Mat, outer: Rect, stroke: i32, color: Scalar) {
        fill(image, outer, color);
        let inner = Rect::new(
            outer.x + stroke,
            outer.y + stroke,
            outer.width - 2 * stroke,
            outer.height - 2 * stroke,
        );
        fill(image, inner, white());
    }

    #[test]
    fn test_detector_creation() {
        let detector = BorderDetector::new();
        assert_eq!(detector.band, HsvBand::purple());
        assert_eq!(detector.min_contour_area, 100.0);
        assert_eq!(detector.border_margin, 12);
    }

    #[test]
    fn test_detector_from_config() {
        let mut config = DetectionConfig::default();
        config.border_margin = 5;
        config.hue_min = 100;
        let detector = BorderDetector::from_config(&config);
        assert_eq!(detector.border_margin(), 5);
        assert_eq!(detector.band().lower[0], 100);
    }

    #[test]
    fn test_margin_shrinks_each_side() {
        let region = BorderRegion::from_bounding_box(BoundingBox::new(100, 80, 300, 200), 12, 1.0);
        assert_eq!(region.crop, BoundingBox::new(112, 92, 276, 176));
        assert_eq!(region.contour_bounds, BoundingBox::new(100, 80, 300, 200));
    }

    #[test]
    fn test_oversized_margin_collapses_crop() {
        let region = BorderRegion::from_bounding_box(BoundingBox::new(10, 10, 20, 30), 12, 1.0);
        assert_eq!(region.crop, BoundingBox::new(22, 22, 0, 6));
        assert!(region.is_empty());
    }

    #[test]
    fn test_huge_margin_saturates() {
        let bounds = BoundingBox::new(100, 80, 300, 200);

        let region = BorderRegion::from_bounding_box(bounds, i32::MAX, 1.0);
        assert_eq!(region.crop, BoundingBox::new(i32::MAX, i32::MAX, 0, 0));
        assert!(region.is_empty());

        let region = BorderRegion::from_bounding_box(bounds, 1_500_000_000, 1.0);
        assert_eq!(region.crop.width, 0);
        assert_eq!(region.crop.height, 0);
        assert_eq!(region.clamp_to(500, 400), BoundingBox::new(500, 400, 0, 0));
    }

    #[test]
    fn test_clamp_to_image() {
        let region = BorderRegion {
            crop: BoundingBox::new(50, 40, 100, 100),
            contour_bounds: BoundingBox::new(38, 28, 124, 124),
            contour_area: 1.0,
        };
        assert_eq!(region.clamp_to(120, 200), BoundingBox::new(50, 40, 70, 100));
        assert_eq!(region.clamp_to(40, 30), BoundingBox::new(40, 30, 0, 0));
    }

    #[test]
    fn test_mask_marks_purple_pixels() {
        let mut page = blank_page(20, 10);
        fill(&mut page, Rect::new(5, 2, 3, 4), purple());

        let mask = BorderDetector::new().color_mask(&page).unwrap();
        assert_eq!(opencv::core::count_non_zero(&mask).unwrap(), 12);
        assert_eq!(*mask.at_2d::<u8>(3, 6).unwrap(), 255);
        assert_eq!(*mask.at_2d::<u8>(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_blank_page_has_no_region() {
        let page = blank_page(400, 300);
        assert!(BorderDetector::new().detect(&page).unwrap().is_none());
    }

    #[test]
    fn test_other_colors_are_ignored() {
        let mut page = blank_page(400, 300);
        // green, red and a greyish violet with low saturation
        let green = Scalar::new(0.0, 200.0, 0.0, 0.0);
        let red = Scalar::new(0.0, 0.0, 200.0, 0.0);
        let grey_violet = Scalar::new(200.0, 190.0, 195.0, 0.0);
        draw_frame(&mut page, Rect::new(10, 10, 100, 100), 6, green);
        draw_frame(&mut page, Rect::new(150, 10, 100, 100), 6, red);
        draw_frame(&mut page, Rect::new(10, 150, 100, 100), 6, grey_violet);

        assert!(BorderDetector::new().detect(&page).unwrap().is_none());
    }

    #[test]
    fn test_single_frame_detected() {
        let mut page = blank_page(500, 400);
        draw_frame(&mut page, Rect::new(100, 80, 300, 200), 6, purple());

        let region = BorderDetector::new().detect(&page).unwrap().unwrap();
        assert_eq!(region.contour_bounds, BoundingBox::new(100, 80, 300, 200));
        assert_eq!(region.crop, BoundingBox::new(112, 92, 276, 176));
        assert!(region.contour_area > 100.0);
    }

    #[test]
    fn test_small_blobs_are_noise() {
        let mut page = blank_page(200, 200);
        fill(&mut page, Rect::new(20, 20, 8, 8), purple());
        fill(&mut page, Rect::new(100, 100, 10, 10), purple());

        assert!(BorderDetector::new().detect(&page).unwrap().is_none());
    }

    #[test]
    fn test_largest_frame_wins() {
        let mut page = blank_page(600, 400);
        draw_frame(&mut page, Rect::new(20, 20, 100, 80), 4, purple());
        draw_frame(&mut page, Rect::new(200, 50, 350, 300), 4, purple());
        fill(&mut page, Rect::new(150, 350, 5, 5), purple());

        let region = BorderDetector::new().detect(&page).unwrap().unwrap();
        assert_eq!(region.contour_bounds, BoundingBox::new(200, 50, 350, 300));
    }

    #[test]
    fn test_crop_extracts_frame_content() {
        let mut page = blank_page(500, 400);
        draw_frame(&mut page, Rect::new(100, 80, 300, 200), 6, purple());
        // marker just inside the crop's top-left corner
        fill(&mut page, Rect::new(112, 92, 2, 2), Scalar::new(0.0, 0.0, 0.0, 0.0));

        let detector = BorderDetector::new();
        let region = detector.detect(&page).unwrap().unwrap();
        let crop = detector.crop(&page, &region).unwrap().unwrap();

        assert_eq!(crop.cols(), 276);
        assert_eq!(crop.rows(), 176);
        assert_eq!(crop.at_2d::<Vec3b>(0, 0).unwrap().0, [0, 0, 0]);
        assert_eq!(crop.at_2d::<Vec3b>(5, 5).unwrap().0, [255, 255, 255]);
        // stroke is excluded
        let mask = detector.color_mask(&crop).unwrap();
        assert_eq!(opencv::core::count_non_zero(&mask).unwrap(), 0);
    }

    #[test]
    fn test_collapsed_region_yields_no_crop() {
        let mut page = blank_page(300, 300);
        draw_frame(&mut page, Rect::new(50, 50, 40, 100), 4, purple());

        let detector = BorderDetector::with_params(HsvBand::purple(), 100.0, 30);
        let region = detector.detect(&page).unwrap().unwrap();
        assert!(region.is_empty());
        assert!(detector.crop(&page, &region).unwrap().is_none());
    }

    #[test]
    fn test_rejects_non_bgr_input() {
        let gray =
            Mat::new_rows_cols_with_default(10, 10, opencv::core::CV_8UC1, Scalar::all(0.0))
                .unwrap();
        let result = BorderDetector::new().detect(&gray);
        assert!(matches!(result, Err(ConversionError::InvalidParameter { .. })));

        let result = BorderDetector::new().detect(&Mat::default());
        assert!(result.is_err());
    }
}
