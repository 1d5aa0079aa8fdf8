//! Stage and page configuration

use std::collections::BTreeMap;

use serde::Deserialize;

use parallax_core::{ParallaxError, ParallaxResult, Pose, SectionDescriptor, SectionId};
use parallax_motion::InterpolatorConfig;
use parallax_state::PageSetup;

use crate::ModelPlacement;

/// Stage configuration
#[derive(Clone, Debug)]
pub struct StageConfig {
    /// Rotation/scale convergence rates
    pub interpolator: InterpolatorConfig,
    /// Model offset applied before the live transform
    pub placement: ModelPlacement,
    /// Distance below which the model counts as settled
    pub settle_epsilon: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        StageConfig {
            interpolator: InterpolatorConfig::default(),
            placement: ModelPlacement::default(),
            settle_epsilon: 1e-3,
        }
    }
}

/// Optional motion overrides in a page file
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MotionSettings {
    pub rotation_rate: Option<f32>,
    pub scale_rate: Option<f32>,
}

/// Page description as supplied by the host, e.g.
///
/// ```json
/// {
///   "home": "hero",
///   "poses": {
///     "hero":  { "rotationY": 0.2, "rotationX": 0, "scale": 1 },
///     "chest": { "rotationY": 0,   "rotationX": 0, "scale": 1.5 }
///   },
///   "sections": [{ "id": "chest", "visibilityThreshold": 0.6 }]
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    pub home: SectionId,
    pub poses: BTreeMap<SectionId, Pose>,
    pub sections: Vec<SectionDescriptor>,
    #[serde(default)]
    pub motion: MotionSettings,
}

impl PageConfig {
    pub fn from_json(json: &str) -> ParallaxResult<Self> {
        serde_json::from_str(json).map_err(|e| ParallaxError::InvalidConfig(e.to_string()))
    }

    /// Validate into a page setup (fails fast on the first bad id)
    pub fn setup(&self) -> ParallaxResult<PageSetup> {
        let poses = self.poses.iter().map(|(id, pose)| (id.clone(), *pose));
        PageSetup::validate(self.home.clone(), poses, self.sections.clone())
    }

    /// Stage configuration with this page's motion overrides applied
    pub fn stage_config(&self) -> ParallaxResult<StageConfig> {
        let mut config = StageConfig::default();
        if let Some(rate) = self.motion.rotation_rate {
            config.interpolator.rotation_rate = check_rate("rotationRate", rate)?;
        }
        if let Some(rate) = self.motion.scale_rate {
            config.interpolator.scale_rate = check_rate("scaleRate", rate)?;
        }
        Ok(config)
    }
}

fn check_rate(name: &str, rate: f32) -> ParallaxResult<f32> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(ParallaxError::InvalidConfig(format!(
            "{name} must be a positive finite number, got {rate}"
        )))
    }
}
