//! Stage - one page view of the scroll-driven model
//!
//! Layout passes only ever write the active section. Frames only ever read
//! it, re-resolving the target pose every time, so a section change lands on
//! the very next frame without any invalidation step.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use parallax_core::{FrameDelta, ParallaxResult, Pose, SectionId};
use parallax_motion::{LiveTransform, TransformInterpolator};
use parallax_state::{resolve_detailed, PageSetup, SharedActiveSection, Transition};
use parallax_time::FrameSource;
use parallax_visibility::{PageLayout, SectionEntered, VisibilityBank, Viewport};

use crate::{ChromePort, SceneFrame, ScenePort, StageConfig};

#[derive(Clone, Debug, Default)]
pub struct StageStats {
    pub frames: u64,
    pub layout_passes: u64,
    /// Entry notifications applied to the active section
    pub entries: u64,
    pub transitions: u64,
    /// Frames that resolved an unknown section to the home pose
    pub fallbacks: u64,
    pub last_frame_duration: Duration,
}

/// A page view: detectors, active section, interpolator
pub struct Stage {
    page: PageSetup,
    /// Active-section slot; clones may be held by other writers
    active: SharedActiveSection,
    visibility: VisibilityBank,
    interpolator: TransformInterpolator,
    config: StageConfig,
    stats: StageStats,
    /// Target resolved by the most recent frame
    last_target: Pose,
    /// Generation and section last reported to the page chrome
    chrome_generation: u64,
    chrome_section: SectionId,
    /// Unknown active ids already logged
    unknown_logged: HashSet<SectionId>,
}

impl Stage {
    /// Create a stage with default configuration
    pub fn new(page: PageSetup) -> Self {
        Self::with_config(page, StageConfig::default())
    }

    pub fn with_config(page: PageSetup, config: StageConfig) -> Self {
        let home = page.home().clone();
        let active = SharedActiveSection::new(home.clone());
        let visibility = VisibilityBank::new(page.sections());
        let home_pose = page.home_pose();
        let interpolator = TransformInterpolator::with_config(home_pose, config.interpolator.clone());

        tracing::info!(
            home = %home,
            sections = page.sections().len(),
            rotation_rate = config.interpolator.rotation_rate,
            scale_rate = config.interpolator.scale_rate,
            "stage created"
        );

        Stage {
            page,
            active,
            visibility,
            interpolator,
            config,
            stats: StageStats::default(),
            last_target: home_pose,
            chrome_generation: 0,
            chrome_section: home,
            unknown_logged: HashSet::new(),
        }
    }

    /// Handle to the active-section slot, for hosts that detect visibility
    /// on another thread
    pub fn active_handle(&self) -> SharedActiveSection {
        self.active.clone()
    }

    /// Apply an entry notification directly
    pub fn enter(&mut self, section: SectionId) -> Option<Transition> {
        self.deliver(vec![SectionEntered { section }])
    }

    /// Feed one section's visible fraction
    pub fn sample_visibility(&mut self, section: &str, fraction: f32) -> ParallaxResult<Option<Transition>> {
        let entered = self.visibility.sample(section, fraction)?;
        Ok(self.deliver(entered.into_iter().collect()))
    }

    /// Evaluate a full layout pass. Entries of the same pass are applied in
    /// declaration order, so the lowest entered section wins.
    pub fn observe_layout(&mut self, viewport: &Viewport, layout: &PageLayout) -> ParallaxResult<Option<Transition>> {
        self.stats.layout_passes += 1;
        let entered = self.visibility.observe(viewport, layout)?;
        Ok(self.deliver(entered))
    }

    /// Apply entries delivered in the same tick; the last one wins
    pub fn deliver(&mut self, entered: Vec<SectionEntered>) -> Option<Transition> {
        if entered.is_empty() {
            return None;
        }
        self.stats.entries += entered.len() as u64;

        let transition = self.active.enter_all(entered.into_iter().map(|e| e.section));
        if let Some(t) = &transition {
            tracing::debug!(from = %t.from, to = %t.to, generation = t.generation, "active section changed");
        }
        transition
    }

    /// Target pose for the active section
    pub fn target(&mut self) -> Pose {
        let active = self.active.current();
        let resolution = resolve_detailed(self.page.table(), active.as_str());
        if resolution.fallback {
            self.stats.fallbacks += 1;
            if self.unknown_logged.insert(active.clone()) {
                tracing::warn!(section = %active, "active section has no pose, using home pose");
            }
        }
        resolution.pose
    }

    /// Advance the model by one frame and return the live transform
    pub fn frame(&mut self, delta: FrameDelta) -> LiveTransform {
        let start = Instant::now();
        self.stats.frames += 1;

        let target = self.target();
        self.last_target = target;
        let live = *self.interpolator.step(&target, delta);

        self.stats.last_frame_duration = start.elapsed();
        live
    }

    /// Run one frame and hand the results to the collaborators: the chrome
    /// hears about a section change once, the renderer gets every frame.
    pub fn render<S, C>(&mut self, delta: FrameDelta, scene: &mut S, chrome: &mut C) -> LiveTransform
    where
        S: ScenePort + ?Sized,
        C: ChromePort + ?Sized,
    {
        let (active, generation) = self.active.snapshot();
        if generation != self.chrome_generation {
            self.chrome_generation = generation;
            // A burst that ended where it started is not a change
            if active != self.chrome_section {
                self.stats.transitions += 1;
                chrome.section_activated(&active);
                self.chrome_section = active;
            }
        }

        let transform = self.frame(delta);
        scene.present(&SceneFrame {
            index: self.stats.frames,
            transform,
            model: self.config.placement.model_matrix(&transform),
        });
        transform
    }

    /// Pull the delta from a frame source, then render
    pub fn run_frame<F, S, C>(&mut self, clock: &mut F, scene: &mut S, chrome: &mut C) -> LiveTransform
    where
        F: FrameSource + ?Sized,
        S: ScenePort + ?Sized,
        C: ChromePort + ?Sized,
    {
        let delta = clock.next_delta();
        self.render(delta, scene, chrome)
    }

    pub fn active_section(&self) -> SectionId {
        self.active.current()
    }

    pub fn live(&self) -> &LiveTransform {
        self.interpolator.live()
    }

    /// Target the most recent frame moved toward
    pub fn last_target(&self) -> Pose {
        self.last_target
    }

    /// Has the model reached the active section's pose
    pub fn is_settled(&mut self) -> bool {
        let target = self.target();
        self.interpolator.is_settled(&target, self.config.settle_epsilon)
    }

    /// Has this section ever been scrolled into view
    pub fn has_entered(&self, section: &str) -> bool {
        self.visibility.has_entered(section)
    }

    pub fn visibility(&self) -> &VisibilityBank {
        &self.visibility
    }

    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn stats(&self) -> &StageStats {
        &self.stats
    }

    /// Frames recovered from a non-finite transform
    pub fn recoveries(&self) -> u64 {
        self.interpolator.stats().recoveries
    }
}
