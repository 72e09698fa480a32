//! Inclusive color band in OpenCV HSV space

use opencv::core::Scalar;
use serde::{Deserialize, Serialize};

use crate::constants::border;

/// Inclusive HSV range using OpenCV's 8-bit convention
/// (hue 0-180, saturation 0-255, value 0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvBand {
    /// Lower bound `[h, s, v]`
    pub lower: [u8; 3],
    /// Upper bound `[h, s, v]`
    pub upper: [u8; 3],
}

impl Default for HsvBand {
    fn default() -> Self {
        Self::purple()
    }
}

impl HsvBand {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// The purple band used to mark table borders
    pub fn purple() -> Self {
        Self::new(
            [border::HUE_MIN, border::SATURATION_MIN, border::VALUE_MIN],
            [border::HUE_MAX, border::SATURATION_MAX, border::VALUE_MAX],
        )
    }

    /// Check whether an HSV pixel falls inside the band
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        [h, s, v]
            .iter()
            .zip(self.lower.iter().zip(self.upper.iter()))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }

    /// Lower bound as an OpenCV scalar for `in_range`
    pub fn lower_scalar(&self) -> Scalar {
        to_scalar(self.lower)
    }

    /// Upper bound as an OpenCV scalar for `in_range`
    pub fn upper_scalar(&self) -> Scalar {
        to_scalar(self.upper)
    }
}

fn to_scalar(hsv: [u8; 3]) -> Scalar {
    Scalar::new(hsv[0] as f64, hsv[1] as f64, hsv[2] as f64, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purple_band_bounds() {
        let band = HsvBand::purple();
        assert_eq!(band.lower, [120, 40, 40]);
        assert_eq!(band.upper, [150, 255, 255]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let band = HsvBand::purple();
        assert!(band.contains(120, 40, 40));
        assert!(band.contains(150, 255, 255));
        assert!(band.contains(139, 255, 200));

        assert!(!band.contains(119, 255, 255)); // blue
        assert!(!band.contains(151, 255, 255)); // pink-red
        assert!(!band.contains(135, 39, 255));  // washed out
        assert!(!band.contains(135, 255, 39));  // too dark
    }

    #[test]
    fn test_scalars() {
        let band = HsvBand::purple();
        assert_eq!(band.lower_scalar(), Scalar::new(120.0, 40.0, 40.0, 0.0));
        assert_eq!(band.upper_scalar(), Scalar::new(150.0, 255.0, 255.0, 0.0));
    }
}
