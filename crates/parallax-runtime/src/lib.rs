//! PARALLAX Runtime - Page stage orchestration
//!
//! This crate wires the engine into a page view. Two inputs arrive at their
//! own cadence and never wait on each other:
//! 1. Layout/scroll passes feed the visibility detectors, whose entries
//!    write the active section
//! 2. Frame callbacks read the active section, resolve its pose, step the
//!    interpolator and hand the live transform to the renderer
//!
//! Plus page configuration parsing and logging setup.

pub mod config;
pub mod port;
pub mod stage;
pub mod telemetry;

pub use config::*;
pub use port::*;
pub use stage::*;
pub use telemetry::*;
