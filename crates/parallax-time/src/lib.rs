//! PARALLAX Time - Frame clocks
//!
//! This crate turns a host's frame callbacks into `FrameDelta`s:
//! - FrameClock: monotonic wall clock, optional stall cap
//! - SteppedClock: fixed-step clock for simulation and tests
//! - FrameSource: the seam the runtime pulls deltas through

pub mod clock;

pub use clock::*;
