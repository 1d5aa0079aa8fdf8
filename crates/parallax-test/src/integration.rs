//! End-to-end scenarios
//!
//! Each scenario scrolls the built-in jacket page through a full stage and
//! checks the frame-to-frame invariants over the recorded trace:
//! - The live transform stays valid and never passes its target
//! - No frame moves further than its blend factor allows
//! - The model settles on the active section's pose once scrolling stops

use parallax_core::SectionId;
use parallax_state::PageSetup;

use crate::chaos::ChaosConfig;
use crate::simulator::{ScrollScript, ScrollSimulator, SimulatorConfig};

/// Seconds of stationary frames after a script, enough for scale to settle
const SETTLE_SECS: f32 = 12.0;

// ============================================================================
// RESULTS
// ============================================================================

/// Scenario outcome
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub passed: bool,
    pub violations: Vec<String>,
    /// Sections in the order they became active
    pub activations: Vec<SectionId>,
    pub final_active: SectionId,
    /// Model on the final section's pose after settling
    pub settled: bool,
    pub frames: usize,
    pub simulated_secs: f32,
}

impl ScenarioResult {
    pub fn activation_ids(&self) -> Vec<&str> {
        self.activations.iter().map(SectionId::as_str).collect()
    }
}

fn run_scenario(config: SimulatorConfig, script: &ScrollScript) -> ScenarioResult {
    let mut sim = ScrollSimulator::new(PageSetup::jacket(), config);
    let finished = sim.run(script) && sim.settle(SETTLE_SECS);

    let (ok, mut violations) = sim.check_invariants();
    if !finished {
        violations.push("frame budget exhausted before simulated time ran out".to_string());
    }
    let settled = sim.stage_mut().is_settled();
    let recoveries = sim.stage().recoveries();

    if recoveries > 0 {
        violations.push(format!("{} numerical recoveries", recoveries));
    }

    ScenarioResult {
        passed: ok && finished && settled && recoveries == 0,
        violations,
        activations: sim.activations().to_vec(),
        final_active: sim.stage().active_section(),
        settled,
        frames: sim.trace().len(),
        simulated_secs: sim.time(),
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

/// Read the page top to bottom, pausing on every section
pub fn scenario_read_through(config: SimulatorConfig) -> ScenarioResult {
    let script = ScrollScript::read_through(4, config.section_height, 1.0);
    run_scenario(config, &script)
}

/// Programmatic jump from the hero straight to the chest section, skipping
/// the sections in between
pub fn scenario_fast_jump(config: SimulatorConfig) -> ScenarioResult {
    let script = ScrollScript::new(0.0)
        .hold(0.2)
        .jump_to(3.0 * config.section_height)
        .hold(0.5);
    run_scenario(config, &script)
}

/// Read to the bottom, then scroll back up to the first feature
pub fn scenario_scroll_back(config: SimulatorConfig) -> ScenarioResult {
    let h = config.section_height;
    let script = ScrollScript::read_through(4, h, 0.5).scroll_to(h, 1.0).hold(0.5);
    run_scenario(config, &script)
}

/// Read-through under frame and delivery chaos
pub fn scenario_chaos(chaos: ChaosConfig, seed: u64) -> ScenarioResult {
    scenario_read_through(SimulatorConfig::default().with_chaos(chaos, seed))
}
