//! PARALLAX Motion - the continuous half of the engine
//!
//! Discrete section changes only move a target. This crate moves the live
//! model transform toward that target once per rendered frame:
//! - lerp and delta-aware blend factors
//! - TransformInterpolator with independent rotation and scale rates
//! - Recovery from numerical corruption (reset to the home pose)

pub mod interpolator;
pub mod lerp;

pub use interpolator::*;
pub use lerp::*;
