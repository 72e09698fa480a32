//! Table border detection
//!
//! Contains the HSV color band predicate and the border-region detector
//! that locates a colored frame on a rendered page and crops its content.

pub mod band;
pub mod border;

pub use band::HsvBand;
pub use border::{BorderDetector, BorderRegion, BoundingBox};
