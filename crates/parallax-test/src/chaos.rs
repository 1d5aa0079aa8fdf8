//! Chaos for the frame loop and the visibility path
//!
//! Simulates hostile host conditions:
//! - Frame-time jitter and stalls (tab switches, GC pauses)
//! - Entry notifications held back and delivered in one tick
//! - Reordering within a delivery batch
//! - Duplicate notifications

use std::collections::VecDeque;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use parallax_core::FrameDelta;
use parallax_time::FrameSource;
use parallax_visibility::SectionEntered;

/// Frame duration distribution
#[derive(Clone, Debug)]
pub enum FrameJitter {
    /// Every frame lasts exactly this long
    Fixed { ms: u32 },
    /// Uniform between bounds
    Uniform { min_ms: u32, max_ms: u32 },
}

impl FrameJitter {
    pub fn sample(&self, rng: &mut StdRng) -> FrameDelta {
        match self {
            FrameJitter::Fixed { ms } => FrameDelta::from_millis(*ms),
            FrameJitter::Uniform { min_ms, max_ms } => {
                let dist = Uniform::new_inclusive(*min_ms, (*max_ms).max(*min_ms));
                FrameDelta::from_millis(dist.sample(rng))
            }
        }
    }
}

/// Chaos configuration
#[derive(Clone, Debug)]
pub struct ChaosConfig {
    pub frame_jitter: FrameJitter,
    /// Probability that a frame is a long stall
    pub stall_prob: f64,
    /// Stall length in milliseconds
    pub stall_ms: u32,
    /// Probability of a zero-length (paused) frame
    pub pause_prob: f64,
    /// Probability that pending entries are held for another tick
    pub hold_prob: f64,
    /// Shuffle entries delivered in the same tick
    pub shuffle_batches: bool,
    /// Probability of delivering an entry twice
    pub duplicate_prob: f64,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self::calm()
    }
}

impl ChaosConfig {
    /// Steady 60Hz, immediate in-order delivery
    pub fn calm() -> Self {
        ChaosConfig {
            frame_jitter: FrameJitter::Fixed { ms: 16 },
            stall_prob: 0.0,
            stall_ms: 0,
            pause_prob: 0.0,
            hold_prob: 0.0,
            shuffle_batches: false,
            duplicate_prob: 0.0,
        }
    }

    /// Busy main thread
    pub fn rough() -> Self {
        ChaosConfig {
            frame_jitter: FrameJitter::Uniform {
                min_ms: 8,
                max_ms: 50,
            },
            stall_prob: 0.01,
            stall_ms: 500,
            pause_prob: 0.02,
            hold_prob: 0.3,
            shuffle_batches: true,
            duplicate_prob: 0.05,
        }
    }

    /// Background tabs, dropped frames, everything batched
    pub fn hostile() -> Self {
        ChaosConfig {
            frame_jitter: FrameJitter::Uniform {
                min_ms: 0,
                max_ms: 120,
            },
            stall_prob: 0.05,
            stall_ms: 5_000,
            pause_prob: 0.1,
            hold_prob: 0.7,
            shuffle_batches: true,
            duplicate_prob: 0.2,
        }
    }
}

/// Chaos statistics
#[derive(Clone, Debug, Default)]
pub struct ChaosStats {
    pub frames: u64,
    pub stalls: u64,
    pub pauses: u64,
    pub entries_in: u64,
    pub entries_out: u64,
    pub duplicates: u64,
    pub held_ticks: u64,
    /// Largest number of entries delivered in one tick
    pub max_batch: usize,
}

/// Chaos source for frame deltas and entry delivery
pub struct ChaosHost {
    config: ChaosConfig,
    rng: StdRng,
    pending: VecDeque<SectionEntered>,
    stats: ChaosStats,
}

impl ChaosHost {
    pub fn new(config: ChaosConfig, seed: u64) -> Self {
        ChaosHost {
            config,
            rng: StdRng::seed_from_u64(seed),
            pending: VecDeque::new(),
            stats: ChaosStats::default(),
        }
    }

    /// Queue entries produced by a layout pass
    pub fn submit(&mut self, entered: Vec<SectionEntered>) {
        for event in entered {
            self.stats.entries_in += 1;
            if self.rng.gen::<f64>() < self.config.duplicate_prob {
                self.stats.duplicates += 1;
                self.pending.push_back(event.clone());
            }
            self.pending.push_back(event);
        }
    }

    /// Entries delivered this tick (possibly none, possibly a backlog)
    pub fn deliver(&mut self) -> Vec<SectionEntered> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        if self.rng.gen::<f64>() < self.config.hold_prob {
            self.stats.held_ticks += 1;
            return Vec::new();
        }
        self.release()
    }

    /// Deliver everything still pending
    pub fn flush(&mut self) -> Vec<SectionEntered> {
        self.release()
    }

    fn release(&mut self) -> Vec<SectionEntered> {
        let mut batch: Vec<_> = self.pending.drain(..).collect();
        if self.config.shuffle_batches {
            batch.shuffle(&mut self.rng);
        }
        self.stats.entries_out += batch.len() as u64;
        self.stats.max_batch = self.stats.max_batch.max(batch.len());
        batch
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> &ChaosStats {
        &self.stats
    }
}

impl FrameSource for ChaosHost {
    /// Delta for the next frame: a pause, a stall or a jittered frame
    fn next_delta(&mut self) -> FrameDelta {
        self.stats.frames += 1;

        if self.rng.gen::<f64>() < self.config.pause_prob {
            self.stats.pauses += 1;
            return FrameDelta::ZERO;
        }
        if self.rng.gen::<f64>() < self.config.stall_prob {
            self.stats.stalls += 1;
            return FrameDelta::from_millis(self.config.stall_ms);
        }
        self.config.frame_jitter.sample(&mut self.rng)
    }

    fn frames(&self) -> u64 {
        self.stats.frames
    }
}
