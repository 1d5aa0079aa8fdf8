//! PARALLAX Test Harness - Scroll simulation and chaos testing
//!
//! This crate provides:
//! - Frame-time and event-delivery chaos (jitter, stalls, batching, reordering)
//! - Scripted scroll simulation driving a full stage
//! - Invariant checks over recorded traces
//! - End-to-end scenarios

pub mod chaos;
pub mod integration;
pub mod simulator;

pub use chaos::*;
pub use integration::*;
pub use simulator::*;
