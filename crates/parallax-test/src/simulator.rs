//! Scroll Simulator - drives a full stage from a scripted scroll
//!
//! Each simulated frame:
//! 1. Move the viewport to the script's position for the current time
//! 2. Run a layout pass through the detectors
//! 3. Hand entries to the chaos host, deliver whatever it releases
//! 4. Step the stage with the chaos host's frame delta
//! 5. Record a trace sample

use parallax_core::{FrameDelta, Pose, SectionId};
use parallax_motion::LiveTransform;
use parallax_runtime::{Stage, StageConfig};
use parallax_state::PageSetup;
use parallax_time::FrameSource;
use parallax_visibility::{PageLayout, SectionEntered, VisibilityBank, Viewport};

use crate::chaos::{ChaosConfig, ChaosHost};

/// One leg of a scroll script: move linearly to `to_y` over `secs`
/// (zero seconds is an instant programmatic jump)
#[derive(Clone, Debug)]
pub struct ScrollSegment {
    pub to_y: f32,
    pub secs: f32,
}

/// Scroll position as a function of time
#[derive(Clone, Debug, Default)]
pub struct ScrollScript {
    pub start_y: f32,
    pub segments: Vec<ScrollSegment>,
}

impl ScrollScript {
    pub fn new(start_y: f32) -> Self {
        ScrollScript {
            start_y,
            segments: Vec::new(),
        }
    }

    pub fn scroll_to(mut self, to_y: f32, secs: f32) -> Self {
        self.segments.push(ScrollSegment {
            to_y,
            secs: secs.max(0.0),
        });
        self
    }

    pub fn jump_to(self, to_y: f32) -> Self {
        self.scroll_to(to_y, 0.0)
    }

    /// Stay put
    pub fn hold(self, secs: f32) -> Self {
        let y = self.end_y();
        self.scroll_to(y, secs)
    }

    pub fn end_y(&self) -> f32 {
        self.segments.last().map_or(self.start_y, |s| s.to_y)
    }

    pub fn duration(&self) -> f32 {
        self.segments.iter().map(|s| s.secs).sum()
    }

    /// Scroll offset at time `t` (clamped to the script's span)
    pub fn position_at(&self, t: f32) -> f32 {
        let mut from = self.start_y;
        let mut elapsed = 0.0;
        for segment in &self.segments {
            if t < elapsed + segment.secs {
                let progress = (t - elapsed) / segment.secs;
                return from + (segment.to_y - from) * progress;
            }
            elapsed += segment.secs;
            from = segment.to_y;
        }
        from
    }

    /// Read the page top to bottom, pausing on every section
    pub fn read_through(section_count: usize, section_height: f32, pause_secs: f32) -> Self {
        let mut script = ScrollScript::new(0.0);
        for i in 1..=section_count {
            script = script
                .scroll_to(i as f32 * section_height, 0.6)
                .hold(pause_secs);
        }
        script
    }
}

/// One recorded frame
#[derive(Clone, Debug)]
pub struct TraceSample {
    /// Simulated time after this frame
    pub time: f32,
    pub delta: FrameDelta,
    pub scroll_y: f32,
    pub active: SectionId,
    pub target: Pose,
    pub transform: LiveTransform,
}

/// Simulator configuration
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Height of the hero and of every feature section
    pub section_height: f32,
    pub chaos: ChaosConfig,
    pub seed: u64,
    pub stage: StageConfig,
    /// Frame budget for one `run` or `settle` call. Simulated time only
    /// advances by frame deltas, so a host that never advances needs a bound.
    pub max_frames: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            section_height: 800.0,
            chaos: ChaosConfig::calm(),
            seed: 42,
            stage: StageConfig::default(),
            max_frames: 100_000,
        }
    }
}

impl SimulatorConfig {
    pub fn with_chaos(mut self, chaos: ChaosConfig, seed: u64) -> Self {
        self.chaos = chaos;
        self.seed = seed;
        self
    }
}

/// Scroll simulator around a stage
pub struct ScrollSimulator {
    stage: Stage,
    /// Detectors on the simulated host side; entries go through the chaos host
    bank: VisibilityBank,
    layout: PageLayout,
    viewport: Viewport,
    host: ChaosHost,
    max_frames: usize,
    time: f32,
    trace: Vec<TraceSample>,
    /// Sections in the order they became active
    activations: Vec<SectionId>,
}

impl ScrollSimulator {
    pub fn new(page: PageSetup, config: SimulatorConfig) -> Self {
        let bank = VisibilityBank::new(page.sections());
        let ids: Vec<_> = page.sections().iter().map(|d| d.id.clone()).collect();
        // The hero occupies the first section slot
        let layout = PageLayout::stacked(
            &ids,
            config.section_height,
            config.section_height,
            config.viewport_width,
        );
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);

        ScrollSimulator {
            stage: Stage::with_config(page, config.stage),
            bank,
            layout,
            viewport,
            host: ChaosHost::new(config.chaos, config.seed),
            max_frames: config.max_frames,
            time: 0.0,
            trace: Vec::new(),
            activations: Vec::new(),
        }
    }

    /// Play a scroll script to its end. Returns false if the frame budget
    /// ran out first.
    pub fn run(&mut self, script: &ScrollScript) -> bool {
        let start = self.time;
        let end = start + script.duration();
        for _ in 0..self.max_frames {
            if self.time > end {
                return true;
            }
            let y = script.position_at(self.time - start);
            self.frame(y);
        }
        self.time > end
    }

    /// Keep rendering at the current scroll position, flushing held entries.
    /// Returns false if the frame budget ran out first.
    pub fn settle(&mut self, secs: f32) -> bool {
        let y = self.viewport.scroll_y;
        let entered = self.host.flush();
        self.deliver(entered);

        let end = self.time + secs;
        for _ in 0..self.max_frames {
            if self.time >= end {
                return true;
            }
            self.frame(y);
        }
        self.time >= end
    }

    /// Simulate one frame at scroll offset `y`
    pub fn frame(&mut self, y: f32) {
        self.viewport.scroll_to(y);
        // layout is fixed and fully declared
        if let Ok(entered) = self.bank.observe(&self.viewport, &self.layout) {
            self.host.submit(entered);
        }
        let delivered = self.host.deliver();
        self.deliver(delivered);

        let delta = self.host.next_delta();
        let transform = self.stage.frame(delta);
        self.time += delta.as_secs_f32();

        self.trace.push(TraceSample {
            time: self.time,
            delta,
            scroll_y: y,
            active: self.stage.active_section(),
            target: self.stage.last_target(),
            transform,
        });
    }

    fn deliver(&mut self, entered: Vec<SectionEntered>) {
        if let Some(transition) = self.stage.deliver(entered) {
            self.activations.push(transition.to);
        }
    }

    /// Check frame-to-frame invariants over the whole trace
    pub fn check_invariants(&self) -> (bool, Vec<String>) {
        let mut violations = Vec::new();
        let rates = &self.stage.config().interpolator;
        let eps = 1e-5;

        let initial = LiveTransform::from_pose(&self.stage.page().home_pose());
        let mut prev = initial;

        for (i, sample) in self.trace.iter().enumerate() {
            let live = sample.transform;
            let target = sample.target;

            if !live.is_valid() {
                violations.push(format!("frame {}: invalid transform {:?}", i, live));
                prev = live;
                continue;
            }

            let rot = (sample.delta.as_secs_f32() * rates.rotation_rate).clamp(0.0, 1.0);
            let scale = (sample.delta.as_secs_f32() * rates.scale_rate).clamp(0.0, 1.0);

            let attributes = [
                ("rotation_y", prev.rotation_y, live.rotation_y, target.rotation_y, rot),
                ("rotation_x", prev.rotation_x, live.rotation_x, target.rotation_x, rot),
                ("scale", prev.scale, live.scale, target.scale, scale),
            ];
            for (name, before, after, goal, factor) in attributes {
                // never passes the target
                if (goal - after) * (goal - before) < 0.0 {
                    violations.push(format!("frame {}: {} overshot {}", i, name, goal));
                }
                // never moves more than its blend factor allows
                let allowed = factor * (goal - before).abs() + eps;
                if (after - before).abs() > allowed {
                    violations.push(format!(
                        "frame {}: {} jumped {} > {}",
                        i,
                        name,
                        (after - before).abs(),
                        allowed
                    ));
                }
            }
            prev = live;
        }

        (violations.is_empty(), violations)
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn trace(&self) -> &[TraceSample] {
        &self.trace
    }

    pub fn activations(&self) -> &[SectionId] {
        &self.activations
    }

    pub fn host(&self) -> &ChaosHost {
        &self.host
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}
