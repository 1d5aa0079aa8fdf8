//! Transform Interpolator - per-frame exponential smoothing toward a pose
//!
//! Every frame moves each attribute a fraction of its remaining distance:
//!
//! ```text
//! rotation += (target - rotation) * clamp(delta * rotation_rate, 0, 1)
//! scale    += (target - scale)    * clamp(delta * scale_rate,    0, 1)
//! ```
//!
//! Rotation settles in roughly a third of a second; scale is deliberately
//! slower so a change of section reads as a turn followed by a zoom. Because
//! each step only covers part of the remaining distance, retargeting
//! mid-flight bends the motion instead of jumping.

use parallax_core::{FrameDelta, Pose};

use crate::{approach, blend_factor};

/// Interpolator configuration
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolatorConfig {
    /// Rotation convergence rate per second
    pub rotation_rate: f32,
    /// Scale convergence rate per second
    pub scale_rate: f32,
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        InterpolatorConfig {
            rotation_rate: 3.0,
            scale_rate: 1.0,
        }
    }
}

impl InterpolatorConfig {
    /// Faster settling for short pages
    pub fn snappy() -> Self {
        InterpolatorConfig {
            rotation_rate: 6.0,
            scale_rate: 2.0,
        }
    }

    /// Slow, drawn-out moves
    pub fn cinematic() -> Self {
        InterpolatorConfig {
            rotation_rate: 1.5,
            scale_rate: 0.5,
        }
    }
}

/// The model transform as currently displayed
///
/// INVARIANT: finite, scale > 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveTransform {
    pub rotation_y: f32,
    pub rotation_x: f32,
    pub scale: f32,
}

impl LiveTransform {
    pub fn from_pose(pose: &Pose) -> Self {
        LiveTransform {
            rotation_y: pose.rotation_y,
            rotation_x: pose.rotation_x,
            scale: pose.scale,
        }
    }

    pub fn as_pose(&self) -> Pose {
        Pose::new(self.rotation_y, self.rotation_x, self.scale)
    }

    pub fn is_valid(&self) -> bool {
        self.as_pose().is_valid()
    }

    /// Largest per-attribute distance to a pose
    pub fn distance(&self, target: &Pose) -> f32 {
        self.as_pose().distance(target)
    }
}

/// Interpolator statistics
#[derive(Clone, Debug, Default)]
pub struct InterpolatorStats {
    pub frames: u64,
    /// Frames whose result was non-finite and got reset to home
    pub recoveries: u64,
}

/// Owns the live transform and advances it once per frame
#[derive(Debug, Clone)]
pub struct TransformInterpolator {
    live: LiveTransform,
    /// Reset target after numerical corruption
    home: Pose,
    config: InterpolatorConfig,
    stats: InterpolatorStats,
}

impl TransformInterpolator {
    /// Start at the home pose with default rates
    pub fn new(home: Pose) -> Self {
        Self::with_config(home, InterpolatorConfig::default())
    }

    pub fn with_config(home: Pose, config: InterpolatorConfig) -> Self {
        TransformInterpolator {
            live: LiveTransform::from_pose(&home),
            home,
            config,
            stats: InterpolatorStats::default(),
        }
    }

    /// Advance one frame toward `target`.
    ///
    /// Never fails: if the result is not a valid transform it is replaced by
    /// the home pose and the anomaly is logged.
    pub fn step(&mut self, target: &Pose, delta: FrameDelta) -> &LiveTransform {
        self.stats.frames += 1;

        let rot = blend_factor(delta, self.config.rotation_rate);
        let scale = blend_factor(delta, self.config.scale_rate);

        let next = LiveTransform {
            rotation_y: approach(self.live.rotation_y, target.rotation_y, rot),
            rotation_x: approach(self.live.rotation_x, target.rotation_x, rot),
            scale: approach(self.live.scale, target.scale, scale),
        };

        if next.is_valid() {
            self.live = next;
        } else {
            self.stats.recoveries += 1;
            tracing::warn!(
                ?next,
                ?target,
                ?delta,
                "non-finite model transform, resetting to home pose"
            );
            self.live = LiveTransform::from_pose(&self.home);
        }

        &self.live
    }

    pub fn live(&self) -> &LiveTransform {
        &self.live
    }

    /// Within `epsilon` of `target` on every attribute
    pub fn is_settled(&self, target: &Pose, epsilon: f32) -> bool {
        self.live.distance(target) <= epsilon
    }

    pub fn home(&self) -> &Pose {
        &self.home
    }

    pub fn config(&self) -> &InterpolatorConfig {
        &self.config
    }

    pub fn stats(&self) -> &InterpolatorStats {
        &self.stats
    }

    #[cfg(test)]
    fn corrupt(&mut self, live: LiveTransform) {
        self.live = live;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Log output written while `f` runs
    fn captured_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    const HERO: Pose = Pose::new(0.2, 0.0, 1.0);
    const CHEST: Pose = Pose::new(0.0, 0.0, 1.5);
    const ELBOW: Pose = Pose::new(-0.8, -0.1, 1.4);

    fn dt(secs: f32) -> FrameDelta {
        FrameDelta::from_secs_f32(secs)
    }

    #[test]
    fn test_scenario_hero_to_chest() {
        let mut interp = TransformInterpolator::new(HERO);

        let mut prev = *interp.live();
        for _ in 0..5 {
            let live = *interp.step(&CHEST, dt(0.1));
            assert!(live.rotation_y < prev.rotation_y && live.rotation_y >= 0.0);
            assert!(live.scale > prev.scale && live.scale <= 1.5);
            prev = live;
        }

        for _ in 5..100 {
            interp.step(&CHEST, dt(0.1));
        }
        let live = interp.live();
        assert!((live.rotation_y - 0.0).abs() < 1e-3);
        assert!((live.scale - 1.5).abs() < 1e-3);
        assert!(interp.is_settled(&CHEST, 1e-3));
    }

    #[test]
    fn test_first_frame_values() {
        let mut interp = TransformInterpolator::new(HERO);
        let live = *interp.step(&CHEST, dt(0.1));

        // rotation covers 30% of the gap, scale 10%
        assert!((live.rotation_y - 0.14).abs() < 1e-6);
        assert!((live.scale - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_paused_frame_is_noop() {
        let mut interp = TransformInterpolator::new(HERO);
        interp.step(&ELBOW, dt(0.05));
        let before = *interp.live();

        interp.step(&ELBOW, FrameDelta::ZERO);
        assert_eq!(*interp.live(), before);
    }

    #[test]
    fn test_idempotent_at_rest() {
        let mut interp = TransformInterpolator::new(CHEST);
        for _ in 0..50 {
            interp.step(&CHEST, dt(0.016));
            assert_eq!(interp.live().as_pose(), CHEST);
        }
    }

    #[test]
    fn test_rotation_converges_within_two_seconds() {
        let mut interp = TransformInterpolator::new(HERO);
        let target = Pose::new(ELBOW.rotation_y, ELBOW.rotation_x, HERO.scale);
        let mut prev = interp.live().distance(&target);

        for _ in 0..120 {
            let d = interp.step(&target, dt(1.0 / 60.0)).distance(&target);
            assert!(d < prev);
            prev = d;
        }
        assert!(prev < 1e-2);
    }

    #[test]
    fn test_scale_converges_within_four_seconds() {
        let mut interp = TransformInterpolator::new(HERO);
        let target = Pose::new(HERO.rotation_y, HERO.rotation_x, CHEST.scale);
        let mut prev = (interp.live().scale - target.scale).abs();

        for _ in 0..240 {
            let d = (interp.step(&target, dt(1.0 / 60.0)).scale - target.scale).abs();
            assert!(d < prev);
            prev = d;
        }
        assert!(prev < 1e-2);
    }

    #[test]
    fn test_scale_is_slower_than_rotation() {
        let mut interp = TransformInterpolator::new(Pose::new(0.0, 0.0, 1.0));
        let target = Pose::new(1.0, 0.0, 2.0);
        for _ in 0..10 {
            interp.step(&target, dt(1.0 / 60.0));
        }
        let live = interp.live();
        assert!(live.rotation_y > live.scale - 1.0);
    }

    #[test]
    fn test_huge_delta_lands_on_target() {
        let mut interp = TransformInterpolator::new(HERO);
        interp.step(&ELBOW, dt(30.0));
        assert_eq!(interp.live().as_pose(), ELBOW);

        interp.step(&CHEST, FrameDelta::from_secs_f32(f32::INFINITY));
        assert_eq!(interp.live().as_pose(), CHEST);
        assert_eq!(interp.stats().recoveries, 0);
    }

    #[test]
    fn test_retarget_mid_flight_is_continuous() {
        let mut interp = TransformInterpolator::new(HERO);
        for _ in 0..5 {
            interp.step(&ELBOW, dt(1.0 / 60.0));
        }
        let before = *interp.live();
        let after = *interp.step(&CHEST, dt(1.0 / 60.0));

        // One frame moves at most 5% of the rotation gap
        let gap = (CHEST.rotation_y - before.rotation_y).abs();
        assert!((after.rotation_y - before.rotation_y).abs() <= 0.05 * gap + 1e-6);
    }

    #[test]
    fn test_recovers_from_non_finite_state() {
        let mut interp = TransformInterpolator::new(HERO);
        interp.corrupt(LiveTransform {
            rotation_y: f32::NAN,
            rotation_x: 0.0,
            scale: 1.2,
        });

        let live = *interp.step(&CHEST, dt(0.016));
        assert_eq!(live.as_pose(), HERO);
        assert_eq!(interp.stats().recoveries, 1);

        // Subsequent frames keep running normally
        interp.step(&CHEST, dt(0.016));
        assert!(interp.live().is_valid());
        assert_eq!(interp.stats().frames, 2);
    }

    #[test]
    fn test_reset_is_logged_as_warning() {
        let mut interp = TransformInterpolator::new(HERO);
        interp.corrupt(LiveTransform {
            rotation_y: 0.0,
            rotation_x: 0.0,
            scale: f32::INFINITY,
        });

        let logs = captured_logs(|| {
            interp.step(&CHEST, dt(0.016));
            interp.step(&CHEST, dt(0.016));
        });

        assert_eq!(logs.matches("resetting to home pose").count(), 1);
        assert!(logs.contains("WARN"));
        assert_eq!(interp.stats().recoveries, 1);
    }

    #[test]
    fn test_recovers_from_invalid_target() {
        let mut interp = TransformInterpolator::new(HERO);
        interp.step(&Pose::new(f32::INFINITY, 0.0, 1.0), dt(0.1));
        assert!(interp.live().is_valid());
        assert_eq!(interp.stats().recoveries, 1);
    }

    fn pose_strategy() -> impl Strategy<Value = Pose> {
        (-4.0f32..4.0, -1.0f32..1.0, 0.1f32..3.0).prop_map(|(y, x, s)| Pose::new(y, x, s))
    }

    proptest! {
        #[test]
        fn prop_never_overshoots(
            start in pose_strategy(),
            target in pose_strategy(),
            deltas in proptest::collection::vec(0.0f32..2.0, 1..60),
        ) {
            let mut interp = TransformInterpolator::new(start);
            for secs in deltas {
                let prev = *interp.live();
                let live = *interp.step(&target, dt(secs));

                prop_assert!(live.is_valid());
                prop_assert!((target.rotation_y - live.rotation_y).abs() <= (target.rotation_y - prev.rotation_y).abs());
                prop_assert!((target.rotation_x - live.rotation_x).abs() <= (target.rotation_x - prev.rotation_x).abs());
                prop_assert!((target.scale - live.scale).abs() <= (target.scale - prev.scale).abs());
                // same side of the target as before
                prop_assert!((target.rotation_y - live.rotation_y) * (target.rotation_y - prev.rotation_y) >= 0.0);
                prop_assert!((target.scale - live.scale) * (target.scale - prev.scale) >= 0.0);
            }
        }

        #[test]
        fn prop_scale_stays_positive(
            target in pose_strategy(),
            deltas in proptest::collection::vec(0.0f32..1.0, 1..60),
        ) {
            let mut interp = TransformInterpolator::new(Pose::new(0.2, 0.0, 1.0));
            for secs in deltas {
                prop_assert!(interp.step(&target, dt(secs)).scale > 0.0);
            }
        }
    }
}
