//! Error types for PARALLAX

use thiserror::Error;

use crate::SectionId;

/// Core PARALLAX errors
///
/// Only startup configuration and malformed host input are errors. Numerical
/// anomalies in the frame loop are recovered locally and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParallaxError {
    // Configuration errors
    #[error("Section {section} has no entry in the pose table")]
    UnknownPose { section: SectionId },

    #[error("Home section {home} has no entry in the pose table")]
    MissingHomePose { home: SectionId },

    #[error("Section {0} is declared more than once")]
    DuplicateSection(SectionId),

    #[error("Section {section} has visibility threshold {threshold}, expected a fraction in (0, 1]")]
    InvalidThreshold { section: SectionId, threshold: f32 },

    #[error("Pose for {section} is invalid: {reason}")]
    InvalidPose {
        section: SectionId,
        reason: &'static str,
    },

    #[error("Section identifier must not be empty")]
    EmptySectionId,

    #[error("Invalid page configuration: {0}")]
    InvalidConfig(String),

    // Layout input errors
    #[error("Visibility sample for unknown section {0}")]
    UnknownSection(SectionId),
}

impl ParallaxError {
    /// Section the diagnostic points at, if any
    pub fn section(&self) -> Option<&SectionId> {
        match self {
            ParallaxError::UnknownPose { section }
            | ParallaxError::InvalidThreshold { section, .. }
            | ParallaxError::InvalidPose { section, .. } => Some(section),
            ParallaxError::MissingHomePose { home } => Some(home),
            ParallaxError::DuplicateSection(id) | ParallaxError::UnknownSection(id) => Some(id),
            ParallaxError::EmptySectionId | ParallaxError::InvalidConfig(_) => None,
        }
    }
}

/// Result type for PARALLAX operations
pub type ParallaxResult<T> = Result<T, ParallaxError>;
