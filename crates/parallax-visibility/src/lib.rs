//! PARALLAX Visibility - Which sections are on screen
//!
//! Scroll position is noisy and irregular; this crate reduces it to discrete
//! "section entered" notifications:
//! - Geometry: rects, viewport with root margin, visible-area fraction
//! - VisibilityDetector: one per section, rising-edge only
//! - VisibilityBank: all detectors of a page, fed per sample or per layout pass

pub mod bank;
pub mod detector;
pub mod geometry;

pub use bank::*;
pub use detector::*;
pub use geometry::*;
