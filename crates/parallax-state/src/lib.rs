//! PARALLAX State - Which section is active and where the model should be
//!
//! This crate implements the discrete half of the engine:
//! - Pose table and page setup validation
//! - Active-section state machine (latest entry wins)
//! - Shared last-write-wins slot for multi-threaded hosts
//! - Pose resolution with home fallback
//! - The built-in jacket page catalog

pub mod active;
pub mod catalog;
pub mod resolver;
pub mod table;

pub use active::*;
pub use catalog::*;
pub use resolver::*;
pub use table::*;
