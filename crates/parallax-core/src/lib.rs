//! PARALLAX Core - Fundamental types and primitives
//!
//! This crate defines the core types shared by the scroll-driven pose engine:
//! - Section identifiers (SectionId)
//! - Poses (rotation + scale targets for the model)
//! - Section descriptors (visibility thresholds)
//! - Frame time primitives (FrameDelta)
//! - Error types

pub mod error;
pub mod id;
pub mod pose;
pub mod section;
pub mod time;

pub use error::*;
pub use id::*;
pub use pose::*;
pub use section::*;
pub use time::*;
