//! Clock implementations for the frame loop

use std::time::{Duration, Instant};

use parallax_core::FrameDelta;

/// Anything that can hand out the delta for the next frame
pub trait FrameSource {
    /// Advance to the next frame and return the elapsed time
    fn next_delta(&mut self) -> FrameDelta;

    /// Frames produced so far
    fn frames(&self) -> u64;
}

/// Frame clock configuration
#[derive(Clone, Debug, Default)]
pub struct FrameClockConfig {
    /// Upper bound for a single delta (e.g. after tab re-focus).
    /// `None` passes the raw elapsed time through; the interpolator clamps
    /// its blend factor either way.
    pub max_delta: Option<Duration>,
}

impl FrameClockConfig {
    /// Cap deltas at 100ms so a long stall reads as a few quick frames
    pub fn capped() -> Self {
        FrameClockConfig {
            max_delta: Some(Duration::from_millis(100)),
        }
    }
}

/// Wall-clock frame timer
/// INVARIANT: deltas are monotonic-clock differences, never negative
#[derive(Debug)]
pub struct FrameClock {
    /// Instant of the previous frame (None before the first frame)
    last_frame: Option<Instant>,
    /// Frames ticked so far
    frames: u64,
    config: FrameClockConfig,
}

impl FrameClock {
    /// Create a clock with no stall cap
    pub fn new() -> Self {
        Self::with_config(FrameClockConfig::default())
    }

    pub fn with_config(config: FrameClockConfig) -> Self {
        FrameClock {
            last_frame: None,
            frames: 0,
            config,
        }
    }

    /// Advance using the OS monotonic clock
    pub fn tick(&mut self) -> FrameDelta {
        self.tick_at(Instant::now())
    }

    /// Advance to an explicit instant. The first frame yields a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> FrameDelta {
        let elapsed = match self.last_frame {
            // saturating: an instant earlier than the last frame counts as zero
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        let elapsed = match self.config.max_delta {
            Some(cap) => elapsed.min(cap),
            None => elapsed,
        };

        self.last_frame = Some(now);
        self.frames += 1;
        FrameDelta::from_duration(elapsed)
    }

    /// Forget the previous frame so the next tick yields zero
    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for FrameClock {
    fn next_delta(&mut self) -> FrameDelta {
        self.tick()
    }

    fn frames(&self) -> u64 {
        self.frames
    }
}

/// Fixed-step clock - every frame lasts exactly `step`
#[derive(Debug, Clone)]
pub struct SteppedClock {
    step: FrameDelta,
    frames: u64,
}

impl SteppedClock {
    pub fn new(step: FrameDelta) -> Self {
        SteppedClock { step, frames: 0 }
    }

    /// 60 frames per second
    pub fn sixty_hz() -> Self {
        Self::new(FrameDelta::from_secs_f32(1.0 / 60.0))
    }

    pub fn step(&self) -> FrameDelta {
        self.step
    }

    /// Simulated time elapsed so far, in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.step.as_secs_f32() * self.frames as f32
    }
}

impl FrameSource for SteppedClock {
    fn next_delta(&mut self) -> FrameDelta {
        self.frames += 1;
        self.step
    }

    fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        let start = Instant::now();

        assert!(clock.tick_at(start).is_zero());

        let delta = clock.tick_at(start + Duration::from_millis(16));
        assert!((delta.as_secs_f32() - 0.016).abs() < 1e-4);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_backwards_instant_is_zero() {
        let mut clock = FrameClock::new();
        let start = Instant::now() + Duration::from_secs(1);

        clock.tick_at(start);
        let delta = clock.tick_at(start - Duration::from_millis(5));
        assert!(delta.is_zero());
    }

    #[test]
    fn test_capped_clock() {
        let mut clock = FrameClock::with_config(FrameClockConfig::capped());
        let start = Instant::now();

        clock.tick_at(start);
        let delta = clock.tick_at(start + Duration::from_secs(5));
        assert!((delta.as_secs_f32() - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_reset_restarts_delta() {
        let mut clock = FrameClock::new();
        let start = Instant::now();

        clock.tick_at(start);
        clock.reset();
        assert!(clock.tick_at(start + Duration::from_secs(2)).is_zero());
    }

    #[test]
    fn test_stepped_clock() {
        let mut clock = SteppedClock::new(FrameDelta::from_millis(100));
        for _ in 0..10 {
            assert!((clock.next_delta().as_secs_f32() - 0.1).abs() < 1e-6);
        }
        assert_eq!(clock.frames(), 10);
        assert!((clock.elapsed_secs() - 1.0).abs() < 1e-5);
    }
}
