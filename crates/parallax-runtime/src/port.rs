//! Ports to the collaborators outside the engine
//!
//! The renderer draws whatever transform it is handed, without smoothing of
//! its own. Page chrome (navigation highlights, entrance effects) only hears
//! about section changes.

use glam::{EulerRot, Mat4, Quat, Vec3};

use parallax_core::SectionId;
use parallax_motion::LiveTransform;

/// Where the model sits in the scene before the live transform is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPlacement {
    pub offset: Vec3,
}

impl Default for ModelPlacement {
    fn default() -> Self {
        // Slightly below the camera's look-at point
        ModelPlacement {
            offset: Vec3::new(0.0, -0.2, 0.0),
        }
    }
}

impl ModelPlacement {
    /// Model matrix: translate * rotate(X then Y, intrinsic XYZ) * uniform scale
    pub fn model_matrix(&self, transform: &LiveTransform) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            transform.rotation_x,
            transform.rotation_y,
            0.0,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(transform.scale), rotation, self.offset)
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame {
    pub index: u64,
    pub transform: LiveTransform,
    pub model: Mat4,
}

/// Scene renderer collaborator
pub trait ScenePort {
    fn present(&mut self, frame: &SceneFrame);
}

/// Page chrome collaborator
pub trait ChromePort {
    fn section_activated(&mut self, section: &SectionId);
}

/// Chrome that ignores section changes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChrome;

impl ChromePort for NoChrome {
    fn section_activated(&mut self, _section: &SectionId) {}
}

impl<F> ScenePort for F
where
    F: FnMut(&SceneFrame),
{
    fn present(&mut self, frame: &SceneFrame) {
        self(frame)
    }
}
