mod common;

use bevy_math::Vec3;
use common::*;
use plot_space::core::{Axis, Color, Plane, TextSpec};
use plot_space::scene::{NodeRole, Primitive, SceneChange};
use plot_space::space::PlotSpace;
use std::sync::Arc;

fn labeled_space() -> (PlotSpace, Arc<Recorder>) {
    let data = Arc::new(Recorder::with_points(&[[1.0, 1.0, 1.0]]));
    *data.labels_enabled.lock() = true;
    let mut space = PlotSpace::new(cube_config()).unwrap();
    space.set_data_source(&data);
    space.set_delegate(&data);
    (space, data)
}

fn tick_labels(space: &PlotSpace) -> usize {
    space
        .scene()
        .count_where(|r| matches!(r, NodeRole::TickLabel(..)))
}

#[test]
fn declined_ticks_are_skipped_without_placeholder() {
    let (mut space, data) = labeled_space();
    data.unlabeled.lock().push((Axis::X, 1));
    space.reload_labels();

    assert_eq!(tick_labels(&space), 14, "five ticks per axis, one declined");
    assert!(
        space
            .scene()
            .iter()
            .all(|n| n.role != NodeRole::TickLabel(Axis::X, 1)),
        "declined tick must not produce a node"
    );
    assert_eq!(space.labels().tick_label_nodes().len(), 14);
}

#[test]
fn rebuild_discards_previous_labels() {
    let (mut space, _data) = labeled_space();
    space.reload_labels();
    space.reload_labels();
    assert_eq!(tick_labels(&space), 15);
}

#[test]
fn tick_label_sits_past_the_far_end_of_its_gridline() {
    let (mut space, _data) = labeled_space();
    space.reload_labels();

    let scene = space.scene();
    let label = scene
        .iter()
        .find(|n| n.role == NodeRole::TickLabel(Axis::X, 0))
        .expect("first x tick label");
    let pos = scene.world_position(label.id).unwrap();
    // Vertical xz line 0 runs along z at x = 1 and ends at z = 5.
    assert!(approx_vec(pos, Vec3::new(1.0, 0.0, 5.6)), "got {pos:?}");
    match &label.primitive {
        Some(Primitive::Text(spec)) => assert_eq!(spec.text, "x0"),
        other => panic!("expected text, got {other:?}"),
    }

    let y_label = scene
        .iter()
        .find(|n| n.role == NodeRole::TickLabel(Axis::Y, 2))
        .expect("third y tick label");
    let pos = scene.world_position(y_label.id).unwrap();
    assert!(approx_vec(pos, Vec3::new(0.0, 3.0, 5.6)), "got {pos:?}");
}

#[test]
fn titles_follow_discard_and_rebuild() {
    let (mut space, _data) = labeled_space();
    space.set_axis_title(Axis::Y, TextSpec::title("height"));
    space.set_axis_title(Axis::X, TextSpec::title("width"));
    space.set_axis_title(Axis::X, TextSpec::title("breadth"));

    let titles: Vec<_> = space
        .scene()
        .iter()
        .filter(|n| matches!(n.role, NodeRole::AxisTitle(_)))
        .collect();
    assert_eq!(titles.len(), 2, "one title node per titled axis");
    assert_eq!(space.labels().title(Axis::X).unwrap().text, "breadth");

    let y = titles
        .iter()
        .find(|n| n.role == NodeRole::AxisTitle(Axis::Y))
        .unwrap();
    let pos = space.scene().world_position(y.id).unwrap();
    assert!(approx_vec(pos, Vec3::new(-0.6, 2.5, 0.0)), "got {pos:?}");
    assert_eq!(y.color, Some(Color::LIGHT_TEXT));
}

#[test]
fn labels_without_delegate_keep_only_titles() {
    let (mut space, data) = labeled_space();
    space.set_axis_title(Axis::Z, TextSpec::title("depth"));
    assert_eq!(tick_labels(&space), 15);

    drop(data);
    space.reload_labels();
    assert_eq!(tick_labels(&space), 0);
    assert_eq!(space.labels().title_nodes().len(), 1);
}

#[test]
fn wall_and_unit_plane_toggles() {
    let mut space = PlotSpace::new(cube_config()).unwrap();
    space.scene_mut().drain_changes();

    space.set_wall_hidden(Plane::XY, true);
    assert!(space.is_wall_hidden(Plane::XY));
    assert!(!space.is_wall_hidden(Plane::XZ));

    let wall = space.frame().wall_node(Plane::XY);
    assert_eq!(
        space.scene_mut().drain_changes(),
        vec![SceneChange::Updated(wall)]
    );

    space.set_walls_hidden(true);
    assert!(Plane::ALL.iter().all(|p| space.is_wall_hidden(*p)));
    space.set_walls_hidden(false);
    assert!(Plane::ALL.iter().all(|p| !space.is_wall_hidden(*p)));

    space.set_unit_planes_hidden(true);
    assert!(Plane::ALL.iter().all(|p| space.is_unit_plane_hidden(*p)));
    space.set_unit_plane_hidden(Plane::YZ, false);
    assert!(!space.is_unit_plane_hidden(Plane::YZ));

    space.set_wall_color(Plane::XZ, Color::BLUE);
    assert_eq!(space.wall_color(Plane::XZ), Some(Color::BLUE));
    assert_eq!(
        space.wall_color(Plane::XY),
        Some(space.config().xy_wall_color)
    );
}

#[test]
fn toggles_leave_geometry_alone() {
    let mut space = PlotSpace::new(cube_config()).unwrap();
    let before = space.scene().len();
    space.set_walls_hidden(true);
    space.set_unit_planes_hidden(true);
    space.set_wall_color(Plane::YZ, Color::RED);
    assert_eq!(space.scene().len(), before);
}
