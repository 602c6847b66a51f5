use bevy::prelude::*;

use crate::render::{PlotCollaborators, PlotHostOptions, PlotSpacePlugin, PlotSpaceRes};
use crate::space::PlotSpace;

/// Builds the app hosting `space` without running it, so callers can add
/// their own systems first.
pub fn plot_app(
    space: PlotSpace,
    options: PlotHostOptions,
    collaborators: PlotCollaborators,
) -> App {
    let mut app = App::new();
    app.insert_resource(options)
        .insert_resource(collaborators)
        .insert_resource(PlotSpaceRes::new(space))
        .add_plugins((DefaultPlugins, PlotSpacePlugin));
    app
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_plot(space: PlotSpace, options: PlotHostOptions, collaborators: PlotCollaborators) {
    plot_app(space, options, collaborators).run();
}

#[cfg(target_arch = "wasm32")]
pub fn run_plot(
    space: PlotSpace,
    options: PlotHostOptions,
    collaborators: PlotCollaborators,
    canvas_id: &str,
) {
    App::new()
        .insert_resource(options)
        .insert_resource(collaborators)
        .insert_resource(PlotSpaceRes::new(space))
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{}", canvas_id)),
                    fit_canvas_to_parent: true,
                    ..default()
                }),
                ..default()
            }),
            PlotSpacePlugin,
        ))
        .run();
}
