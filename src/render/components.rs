use crate::core::TextAnchor;
use crate::scene::NodeId;
use bevy::prelude::*;

/// Links an entity to the scene node it mirrors.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneNodeLink(pub NodeId);

/// Marker for the entity mirroring the scene root.
#[derive(Component)]
pub struct PlotRenderRoot;

/// Screen-space text for a tick label or axis title. Placed each frame at the
/// projection of its scene node.
#[derive(Component, Clone, Copy, Debug)]
pub struct PlotLabel {
    pub node: NodeId,
    pub anchor: TextAnchor,
}

/// Orbit camera looking at the plot space.
#[derive(Component, Clone, Copy, Debug)]
pub struct PlotCamera {
    pub target: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub orbit_speed: f32,
    pub pan_speed: f32,
}

impl Default for PlotCamera {
    fn default() -> Self {
        Self::from_position(Vec3::splat(18.0), Vec3::ZERO)
    }
}

impl PlotCamera {
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let mut cam = Self {
            target,
            radius: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            orbit_speed: 0.005,
            pan_speed: 0.0015,
        };
        cam.set_camera_position(position);
        cam
    }

    /// Moves the eye to `position`, keeping the current target.
    pub fn set_camera_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.radius = offset.length().max(0.5);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.radius).clamp(-1.0, 1.0).asin();
    }

    /// Keeps the eye where it is and turns it towards `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let eye = self.position();
        self.target = target;
        self.set_camera_position(eye);
    }

    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.radius
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}
