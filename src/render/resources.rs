use super::components::PlotCamera;
use crate::scene::NodeId;
use crate::space::PlotSpace;
use bevy::prelude::*;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Resource)]
pub struct PlotSpaceRes(pub PlotSpace);

impl PlotSpaceRes {
    pub fn new(space: PlotSpace) -> Self {
        Self(space)
    }
}

/// Keeps the application's collaborators alive for as long as the app runs.
/// The plot space itself only holds weak references.
#[derive(Resource, Default)]
pub struct PlotCollaborators(pub Vec<Arc<dyn Any + Send + Sync>>);

impl PlotCollaborators {
    pub fn holding<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        let anchor: Arc<dyn Any + Send + Sync> = value;
        Self(vec![anchor])
    }
}

/// Host-side presentation settings.
#[derive(Resource, Clone, Copy, Debug)]
pub struct PlotHostOptions {
    pub background: crate::core::Color,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    /// Screen pixels per scene unit of label font size.
    pub label_scale: f32,
    /// Appends newly reported points and connections every frame.
    pub follow_data: bool,
}

impl Default for PlotHostOptions {
    fn default() -> Self {
        Self {
            background: crate::core::Color::BLACK,
            camera_position: Vec3::splat(18.0),
            camera_target: Vec3::ZERO,
            label_scale: 32.0,
            follow_data: false,
        }
    }
}

#[derive(Resource, Default)]
pub struct SceneEntities {
    pub by_node: HashMap<NodeId, Entity>,
}

/// Press that may still turn into a tap.
#[derive(Resource, Default)]
pub struct TapState {
    pub pressed_at: Option<Vec2>,
}

/// Cursor travel beyond which a press is a drag rather than a tap.
pub const TAP_SLOP: f32 = 10.0;

pub fn setup_plot_scene(mut commands: Commands, options: Res<PlotHostOptions>) {
    commands.insert_resource(ClearColor(options.background.into()));
    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let cam = PlotCamera::from_position(options.camera_position, options.camera_target);
    commands.spawn((Camera3d::default(), cam.transform(), cam));
}
