mod common;

use bevy_math::{Vec2, Vec3};
use common::*;
use plot_space::config::PlotConfig;
use plot_space::core::{Axis, Color};
use plot_space::scene::{NodeRole, Primitive};
use plot_space::space::PlotSpace;
use std::sync::Arc;

fn space_with(data: &Arc<Recorder>) -> PlotSpace {
    let mut space = PlotSpace::new(PlotConfig::default()).unwrap();
    space.set_data_source(data);
    space.set_delegate(data);
    space.reload_data();
    space
}

fn three_points() -> Arc<Recorder> {
    Arc::new(Recorder::with_points(&[
        [7.5, 7.5, 7.5],
        [3.0, 3.0, 3.0],
        [12.0, 6.0, 9.0],
    ]))
}

#[test]
fn highlight_is_idempotent_and_clears_at_once() {
    let data = three_points();
    let mut space = space_with(&data);

    space.highlight(0);
    space.highlight(0);
    assert_eq!(projection_lines(space.scene()), 3, "one line per plane");
    assert!(space.highlights().is_highlighted(0));

    space.highlight(2);
    assert_eq!(projection_lines(space.scene()), 6);

    space.remove_highlights();
    assert_eq!(projection_lines(space.scene()), 0);
    assert!(space.highlights().is_empty());
}

#[test]
fn highlight_of_unknown_index_is_a_no_op() {
    let data = three_points();
    let mut space = space_with(&data);
    space.highlight(3);
    space.highlight(-1);
    assert_eq!(projection_lines(space.scene()), 0);
}

#[test]
fn projection_lines_drop_onto_each_plane() {
    let data = three_points();
    let mut space = space_with(&data);
    space.set_highlight_radius(0.02);
    space.set_highlight_color(Color::GREEN);
    space.highlight(0);

    // (7.5, 7.5, 7.5) in the default space sits at (3.5, 3, 2).
    let p = space.plotted_point(0).unwrap().position;
    assert!(approx_vec(p, Vec3::new(3.5, 3.0, 2.0)), "got {p:?}");

    let scene = space.scene();
    for axis in Axis::ALL {
        let node = scene
            .iter()
            .find(|n| n.role == NodeRole::Projection { point: 0, axis })
            .unwrap_or_else(|| panic!("no projection along {axis}"));
        let c = axis.component(p);
        match node.primitive {
            Some(Primitive::Cylinder { radius, height }) => {
                assert!(approx(radius, 0.02));
                assert!(approx(height, c), "{axis} line length");
            }
            ref other => panic!("expected a cylinder, got {other:?}"),
        }
        assert_eq!(node.color, Some(Color::GREEN));

        let world = scene.world_transform(node.id).unwrap();
        assert!(
            approx_vec(world.translation, p - axis.direction() * (c * 0.5)),
            "{axis} line centered halfway to the plane"
        );
        assert!(approx_vec(world.rotation * Vec3::Y, axis.direction()));
    }
}

#[test]
fn tap_on_point_highlights_exclusively_and_notifies() {
    let data = three_points();
    let mut space = space_with(&data);
    let n0 = space.plotted_point(0).unwrap().node;
    let n2 = space.plotted_point(2).unwrap().node;

    assert_eq!(space.handle_tap(Vec2::ZERO, &FixedHit(Some(n0))), Some(0));
    assert_eq!(space.handle_tap(Vec2::ZERO, &FixedHit(Some(n2))), Some(2));

    assert!(!space.highlights().is_highlighted(0), "single selection mode");
    assert!(space.highlights().is_highlighted(2));
    assert_eq!(projection_lines(space.scene()), 3);
    assert_eq!(*data.selected.lock(), vec![0, 2]);
}

#[test]
fn multiple_highlights_accumulate() {
    let data = three_points();
    let mut space = space_with(&data);
    space.set_multiple_highlights_enabled(true);

    for i in 0..3 {
        let node = space.plotted_point(i).unwrap().node;
        space.handle_tap(Vec2::ZERO, &FixedHit(Some(node)));
    }
    assert_eq!(space.highlights().len(), 3);
    assert_eq!(projection_lines(space.scene()), 9);
}

#[test]
fn disabled_highlight_still_reports_selection() {
    let data = three_points();
    let mut space = space_with(&data);
    space.set_highlight_enabled(false);

    let node = space.plotted_point(1).unwrap().node;
    assert_eq!(space.handle_tap(Vec2::ZERO, &FixedHit(Some(node))), Some(1));
    assert!(space.highlights().is_empty());
    assert_eq!(*data.selected.lock(), vec![1]);
}

#[test]
fn tap_on_nothing_or_frame_does_nothing() {
    let data = three_points();
    let mut space = space_with(&data);
    let wall = space.frame().wall_node(plot_space::core::Plane::XY);

    assert_eq!(space.handle_tap(Vec2::ZERO, &FixedHit(None)), None);
    assert_eq!(space.handle_tap(Vec2::ZERO, &FixedHit(Some(wall))), None);
    assert!(data.selected.lock().is_empty());
    assert!(space.highlights().is_empty());
}

#[test]
fn ray_cast_from_the_default_camera_finds_the_point() {
    let data = three_points();
    let mut space = space_with(&data);
    let target = space.plotted_point(0).unwrap().position;
    let eye = Vec3::splat(18.0);

    let hit = space.scene().ray_cast(eye, (target - eye).normalize());
    assert_eq!(hit, Some(space.plotted_point(0).unwrap().node));
    assert_eq!(space.handle_tap(Vec2::ZERO, &FixedHit(hit)), Some(0));
}

#[test]
fn highlights_survive_reload() {
    let data = three_points();
    let mut space = space_with(&data);
    space.highlight(1);
    space.reload_data();
    assert!(space.highlights().is_highlighted(1));
    assert_eq!(projection_lines(space.scene()), 3);
}

#[test]
fn selection_without_delegate_still_highlights() {
    let data = three_points();
    let mut space = space_with(&data);
    let node = space.plotted_point(0).unwrap().node;
    drop(data);

    assert_eq!(space.handle_tap(Vec2::ZERO, &FixedHit(Some(node))), Some(0));
    assert!(space.highlights().is_highlighted(0));
}
