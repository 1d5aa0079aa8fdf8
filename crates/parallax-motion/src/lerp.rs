//! Interpolation helpers

use parallax_core::FrameDelta;

/// Linear interpolation `a + (b - a) * t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` toward `target` by `factor` of the remaining distance.
///
/// `factor` is clamped to [0, 1] and the result is bounded by `current` and
/// `target`, so rounding can never carry the value past the target.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    let t = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
    if t >= 1.0 {
        return target;
    }
    let next = lerp(current, target, t);
    // clamp panics on NaN bounds; corrupted inputs pass through for the
    // caller to detect
    if !(current.is_finite() && target.is_finite()) {
        return next;
    }
    if current <= target {
        next.clamp(current, target)
    } else {
        next.clamp(target, current)
    }
}

/// Fraction of the remaining distance to cover this frame: `delta * rate`
/// clamped to [0, 1].
///
/// A stalled frame (huge or infinite delta) lands exactly on the target
/// instead of overshooting; a zero rate or zero delta never moves.
#[inline]
pub fn blend_factor(delta: FrameDelta, rate: f32) -> f32 {
    let raw = delta.as_secs_f32() * rate;
    if raw.is_nan() {
        // 0 * inf
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}
