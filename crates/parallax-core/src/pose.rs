//! Pose - the rotation/scale target attached to a page section
//!
//! A pose is pure data: where the model should end up while its section is
//! active. The live, moving transform lives in `parallax-motion`.

use serde::{Deserialize, Serialize};

/// Target pose of the model (radians, radians, uniform scale)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Yaw around the vertical axis
    pub rotation_y: f32,
    /// Pitch around the horizontal axis
    #[serde(default)]
    pub rotation_x: f32,
    /// Uniform scale, always > 0
    pub scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        rotation_y: 0.0,
        rotation_x: 0.0,
        scale: 1.0,
    };

    pub const fn new(rotation_y: f32, rotation_x: f32, scale: f32) -> Self {
        Self {
            rotation_y,
            rotation_x,
            scale,
        }
    }

    /// All components finite
    pub fn is_finite(&self) -> bool {
        self.rotation_y.is_finite() && self.rotation_x.is_finite() && self.scale.is_finite()
    }

    /// Finite and with a strictly positive scale
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.scale > 0.0
    }

    /// Largest per-component distance to another pose
    pub fn distance(&self, other: &Pose) -> f32 {
        (self.rotation_y - other.rotation_y)
            .abs()
            .max((self.rotation_x - other.rotation_x).abs())
            .max((self.scale - other.scale).abs())
    }
}
