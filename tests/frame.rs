mod common;

use bevy_math::Vec3;
use common::*;
use plot_space::core::{Axis, GridCategory, Plane};
use plot_space::mapping::{gridline_count, scene_coordinate};
use plot_space::scene::{NodeRole, Primitive};
use plot_space::space::PlotSpace;

#[test]
fn domain_endpoints_map_to_origin_and_axis_end() {
    for (min, max, len) in [(0.0, 10.0, 5.0), (-3.0, 9.0, 7.0), (100.0, 250.0, 4.0)] {
        assert!(approx(scene_coordinate(min, min, max, len), 0.0), "min of {min}..{max}");
        assert!(approx(scene_coordinate(max, min, max, len), len), "max of {min}..{max}");
        let mid = (min + max) * 0.5;
        assert!(
            approx(scene_coordinate(mid, min, max, len), len * 0.5),
            "mapping of {min}..{max} should be linear"
        );
    }
}

#[test]
fn values_outside_the_domain_extrapolate() {
    assert!(approx(scene_coordinate(20.0, 0.0, 10.0, 5.0), 10.0));
    assert!(approx(scene_coordinate(-2.0, 0.0, 10.0, 5.0), -1.0));
}

#[test]
fn gridline_count_is_floor_of_length_over_spacing() {
    assert_eq!(gridline_count(5.0, 1.0), 5);
    assert_eq!(gridline_count(6.0, 4.0), 1);
    assert_eq!(gridline_count(3.9, 1.0), 3);
    assert_eq!(gridline_count(0.5, 1.0), 0);
}

#[test]
fn example_point_maps_to_half_axis() {
    let space = PlotSpace::new(cube_config()).unwrap();
    let p = space
        .mapping()
        .to_scene(&plot_space::core::DomainPoint::new(5.0, 0.0, 0.0));
    assert!(approx_vec(p, Vec3::new(2.5, 0.0, 0.0)), "got {p:?}");
}

#[test]
fn gridlines_sit_at_every_tick() {
    let space = PlotSpace::new(cube_config()).unwrap();

    let xy_vertical = space.vertical_grid_lines(Plane::XY);
    assert_eq!(xy_vertical.len(), 5, "five x ticks on a 0..10 axis with tick 2");
    for (i, line) in xy_vertical.iter().enumerate() {
        assert_eq!(line.index, i);
        assert!(
            approx_vec(line.position, Vec3::new((i + 1) as f32, 2.5, 0.0)),
            "vertical xy line {i} at {:?}",
            line.position
        );
    }

    let xz_horizontal = space.horizontal_grid_lines(Plane::XZ);
    assert_eq!(xz_horizontal.len(), 5);
    for (i, line) in xz_horizontal.iter().enumerate() {
        assert!(
            approx_vec(line.position, Vec3::new(2.5, 0.0, (i + 1) as f32)),
            "horizontal xz line {i} at {:?}",
            line.position
        );
    }
}

#[test]
fn every_grid_category_lies_in_its_plane_and_quadrant() {
    let space = PlotSpace::new(cube_config()).unwrap();
    for category in GridCategory::ALL {
        let normal = category.plane.traits().normal_axis;
        let lines = space.grid_lines(category);
        assert_eq!(lines.len(), 5, "{category:?}");
        for line in lines {
            assert!(
                approx(normal.component(line.position), 0.0),
                "{category:?} line {} leaves its plane: {:?}",
                line.index,
                line.position
            );
            assert!(
                line.position.min_element() > -EPS,
                "{category:?} line {} outside the positive quadrant",
                line.index
            );
        }
    }
}

#[test]
fn default_frame_has_uneven_grids() {
    // y: 0..15 over 6 units, tick 5 => spacing 2, three lines.
    let space = PlotSpace::new(Default::default()).unwrap();
    let ys: Vec<f32> = space
        .horizontal_grid_lines(Plane::XY)
        .iter()
        .map(|l| l.position.y)
        .collect();
    assert_eq!(ys.len(), 3);
    for (got, want) in ys.iter().zip([2.0, 4.0, 6.0]) {
        assert!(approx(*got, want), "y gridline at {got}, expected {want}");
    }
    // x: 0..15 over 7 units, tick 3 => five lines even though 7 / 1.4 is inexact.
    assert_eq!(space.vertical_grid_lines(Plane::XY).len(), 5);
}

#[test]
fn axes_arrows_and_walls_are_placed() {
    let space = PlotSpace::new(cube_config()).unwrap();
    let scene = space.scene();
    let frame = space.frame();

    for axis in Axis::ALL {
        let arrow = scene.world_position(frame.arrow_node(axis)).unwrap();
        assert!(
            approx_vec(arrow, axis.direction() * 5.0),
            "{axis} arrow at {arrow:?}"
        );
        let node = scene.get(frame.axis_node(axis)).unwrap();
        assert_eq!(node.role, NodeRole::Axis(axis));
    }

    let origin = scene.get(frame.origin_node()).unwrap();
    assert_eq!(origin.primitive, Some(Primitive::Sphere { radius: 0.035 }));

    for plane in Plane::ALL {
        let wall = scene.world_position(frame.wall_node(plane)).unwrap();
        let t = plane.traits();
        let want = (t.width_axis.direction() + t.height_axis.direction()) * 2.5;
        assert!(approx_vec(wall, want), "{plane} wall at {wall:?}");

        let unit = scene.world_position(frame.unit_plane_node(plane)).unwrap();
        let want = (t.width_axis.direction() + t.height_axis.direction()) * 0.5;
        assert!(approx_vec(unit, want), "{plane} unit plane at {unit:?}");
    }
}
