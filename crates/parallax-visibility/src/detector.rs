//! Visibility Detector - rising-edge entry detection for one section
//!
//! The detector only remembers whether its section was visible on the previous
//! sample. Resizes, reflows and repeated samples while visible therefore never
//! produce a second notification; only a hidden -> visible transition does.

use parallax_core::{SectionDescriptor, SectionId};

/// Notification that a section crossed its visibility threshold
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionEntered {
    pub section: SectionId,
}

impl SectionEntered {
    pub fn new(section: impl Into<SectionId>) -> Self {
        Self {
            section: section.into(),
        }
    }
}

/// Per-section visibility detector
#[derive(Debug, Clone)]
pub struct VisibilityDetector {
    section: SectionId,
    /// Visible-area fraction in (0, 1]
    threshold: f32,
    /// Above threshold on the last accepted sample
    visible: bool,
    /// Latched on the first entry, never cleared
    has_entered: bool,
    /// Rising edges seen
    entries: u64,
    last_fraction: Option<f32>,
}

impl VisibilityDetector {
    /// Create a detector. The threshold is expected to be validated already
    /// (see `SectionDescriptor::validate`).
    pub fn new(section: SectionId, threshold: f32) -> Self {
        Self {
            section,
            threshold,
            visible: false,
            has_entered: false,
            entries: 0,
            last_fraction: None,
        }
    }

    pub fn from_descriptor(descriptor: &SectionDescriptor) -> Self {
        Self::new(descriptor.id.clone(), descriptor.visibility_threshold)
    }

    /// Feed the current visible-area fraction.
    /// Returns an entry notification on a rising edge only.
    pub fn sample(&mut self, fraction: f32) -> Option<SectionEntered> {
        // A NaN sample carries no information about the layout
        if fraction.is_nan() {
            return None;
        }

        let fraction = fraction.clamp(0.0, 1.0);
        self.last_fraction = Some(fraction);

        let now_visible = fraction >= self.threshold;
        let rising = now_visible && !self.visible;
        self.visible = now_visible;

        if !rising {
            return None;
        }

        self.has_entered = true;
        self.entries += 1;
        tracing::trace!(section = %self.section, fraction, "section entered viewport");
        Some(SectionEntered {
            section: self.section.clone(),
        })
    }

    pub fn section(&self) -> &SectionId {
        &self.section
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Has this section ever entered the viewport
    pub fn has_entered(&self) -> bool {
        self.has_entered
    }

    /// Number of rising edges so far
    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn last_fraction(&self) -> Option<f32> {
        self.last_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn detector() -> VisibilityDetector {
        VisibilityDetector::new(SectionId::new("chest"), 0.6)
    }

    #[test]
    fn test_single_emission_while_visible() {
        let mut d = detector();

        let events: Vec<_> = (0..10).filter_map(|_| d.sample(0.9)).collect();

        assert_eq!(events, vec![SectionEntered::new("chest")]);
        assert_eq!(d.entries(), 1);
        assert!(d.is_visible());
    }

    #[test]
    fn test_no_emission_on_falling_edge() {
        let mut d = detector();
        assert!(d.sample(0.7).is_some());
        assert!(d.sample(0.1).is_none());
        assert!(!d.is_visible());
        assert!(d.has_entered());
    }

    #[test]
    fn test_reentry_emits_again() {
        let mut d = detector();
        assert!(d.sample(0.7).is_some());
        assert!(d.sample(0.2).is_none());
        assert!(d.sample(0.8).is_some());
        assert_eq!(d.entries(), 2);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut d = detector();
        assert!(d.sample(0.59).is_none());
        assert!(d.sample(0.6).is_some());
    }

    #[test]
    fn test_resize_while_visible_is_silent() {
        // A reflow changes the fraction but never drops below threshold
        let mut d = detector();
        assert!(d.sample(1.0).is_some());
        for fraction in [0.95, 0.7, 0.61, 0.8, 1.0] {
            assert!(d.sample(fraction).is_none());
        }
    }

    #[test]
    fn test_nan_sample_ignored() {
        let mut d = detector();
        assert!(d.sample(0.9).is_some());
        assert!(d.sample(f32::NAN).is_none());
        assert!(d.is_visible());
        assert_eq!(d.last_fraction(), Some(0.9));
    }

    proptest! {
        #[test]
        fn prop_entries_match_rising_edges(samples in proptest::collection::vec(0.0f32..=1.0, 0..200)) {
            let mut d = detector();
            let mut expected = 0u64;
            let mut prev = false;
            let mut emitted = 0u64;

            for s in samples {
                let now = s >= 0.6;
                if now && !prev {
                    expected += 1;
                }
                prev = now;
                if d.sample(s).is_some() {
                    emitted += 1;
                }
            }

            prop_assert_eq!(emitted, expected);
            prop_assert_eq!(d.entries(), expected);
        }
    }
}
