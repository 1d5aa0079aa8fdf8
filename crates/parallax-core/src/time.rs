//! Frame time primitives
//!
//! The render loop hands the engine the time elapsed since the previous frame.
//! No fixed frame rate is assumed.

use std::time::Duration;

/// Elapsed time since the previous rendered frame, in seconds
///
/// INVARIANT: never negative and never NaN. Positive infinity is kept so a
/// stalled host still drives the blend factor to its upper clamp.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct FrameDelta(f32);

impl FrameDelta {
    pub const ZERO: FrameDelta = FrameDelta(0.0);

    /// Build from seconds; negative and NaN inputs collapse to zero
    #[inline]
    pub fn from_secs_f32(secs: f32) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            FrameDelta(0.0)
        } else {
            FrameDelta(secs)
        }
    }

    #[inline]
    pub fn from_millis(millis: u32) -> Self {
        FrameDelta(millis as f32 / 1000.0)
    }

    #[inline]
    pub fn from_duration(duration: Duration) -> Self {
        FrameDelta(duration.as_secs_f32())
    }

    #[inline]
    pub fn as_secs_f32(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<Duration> for FrameDelta {
    fn from(duration: Duration) -> Self {
        FrameDelta::from_duration(duration)
    }
}

impl std::fmt::Debug for FrameDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Δ{:.4}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_delta_sanitizes() {
        assert!(FrameDelta::from_secs_f32(-0.5).is_zero());
        assert!(FrameDelta::from_secs_f32(f32::NAN).is_zero());
        assert_eq!(
            FrameDelta::from_secs_f32(f32::INFINITY).as_secs_f32(),
            f32::INFINITY
        );
    }

    #[test]
    fn test_frame_delta_from_duration() {
        let delta = FrameDelta::from(Duration::from_millis(16));
        assert!((delta.as_secs_f32() - 0.016).abs() < 1e-6);
        assert!((FrameDelta::from_millis(100).as_secs_f32() - 0.1).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_frame_delta_never_negative(secs in proptest::num::f32::ANY) {
            let delta = FrameDelta::from_secs_f32(secs);
            prop_assert!(delta.as_secs_f32() >= 0.0);
        }
    }
}
