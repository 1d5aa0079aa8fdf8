//! Section descriptors - which sections exist and when they count as visible

use serde::{Deserialize, Serialize};

use crate::{ParallaxError, ParallaxResult, SectionId};

/// Fraction of a section that must be inside the viewport before it counts as
/// entered
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.6;

/// A scroll section of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDescriptor {
    pub id: SectionId,
    /// Visible-area fraction in (0, 1]
    #[serde(default = "default_threshold")]
    pub visibility_threshold: f32,
}

fn default_threshold() -> f32 {
    DEFAULT_VISIBILITY_THRESHOLD
}

impl SectionDescriptor {
    /// Create a descriptor, rejecting thresholds outside (0, 1]
    pub fn new(id: impl Into<SectionId>, visibility_threshold: f32) -> ParallaxResult<Self> {
        let descriptor = SectionDescriptor {
            id: id.into(),
            visibility_threshold,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Descriptor with the default threshold
    pub fn with_default_threshold(id: impl Into<SectionId>) -> Self {
        SectionDescriptor {
            id: id.into(),
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }

    /// Check id and threshold. Descriptors built through serde skip `new`,
    /// so page validation calls this again.
    pub fn validate(&self) -> ParallaxResult<()> {
        if self.id.is_empty() {
            return Err(ParallaxError::EmptySectionId);
        }
        let t = self.visibility_threshold;
        // NaN fails both comparisons
        if !(t > 0.0 && t <= 1.0) {
            return Err(ParallaxError::InvalidThreshold {
                section: self.id.clone(),
                threshold: t,
            });
        }
        Ok(())
    }
}
