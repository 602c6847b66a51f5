pub mod components;
pub mod resources;
pub mod systems;

pub use components::*;
pub use resources::*;
pub use systems::*;

use bevy::prelude::*;

/// Renders a [`PlotSpaceRes`] and routes input back into it.
#[derive(Default)]
pub struct PlotSpacePlugin;

impl Plugin for PlotSpacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneEntities>()
            .init_resource::<TapState>()
            .init_resource::<PlotHostOptions>()
            .init_resource::<PlotCollaborators>()
            .add_systems(Startup, setup_plot_scene)
            .add_systems(
                Update,
                (
                    orbit_camera,
                    follow_data,
                    detect_taps,
                    sync_scene_nodes,
                    project_labels,
                )
                    .chain(),
            );
    }
}
