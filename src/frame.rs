//! Axis frame: axis cylinders, arrow caps, origin marker, gridlines, unit
//! planes and walls. Built once per plot space.

use crate::config::PlotConfig;
use crate::core::{Axis, Color, GridCategory, GridOrientation, Plane};
use crate::mapping::SceneMapping;
use crate::scene::{NodeId, NodeRole, NodeSpec, Primitive, Scene};
use bevy::prelude::Transform;
use bevy_math::Vec3;

/// A retained gridline. Positions are fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub category: GridCategory,
    pub index: usize,
    pub node: NodeId,
    /// World position of the line's midpoint.
    pub position: Vec3,
    /// World direction the line runs in.
    pub direction: Vec3,
    pub length: f32,
}

impl GridLine {
    /// World position of the end the line runs towards.
    pub fn far_end(&self) -> Vec3 {
        self.position + self.direction * (self.length * 0.5)
    }
}

#[derive(Debug)]
pub struct AxisFrame {
    axes: [NodeId; 3],
    arrows: [NodeId; 3],
    origin: NodeId,
    grid_lines: [Vec<GridLine>; 6],
    unit_planes: [NodeId; 3],
    walls: [NodeId; 3],
}

impl AxisFrame {
    pub fn build(scene: &mut Scene, config: &PlotConfig, mapping: &SceneMapping) -> Self {
        let root = scene.root();

        let mut axes = [root; 3];
        let mut arrows = [root; 3];
        for axis in Axis::ALL {
            let length = mapping.axis(axis).length;
            let node = scene.spawn(
                root,
                NodeSpec::new(NodeRole::Axis(axis))
                    .primitive(Primitive::Cylinder {
                        radius: config.axis_radius,
                        height: length,
                    })
                    .color(Color::WHITE)
                    .transform(Transform {
                        translation: axis.direction() * (length * 0.5),
                        rotation: axis.traits().cylinder_rotation,
                        ..Transform::IDENTITY
                    }),
            );
            let arrow = scene.spawn(
                node,
                NodeSpec::new(NodeRole::Arrow(axis))
                    .primitive(Primitive::Cone {
                        top_radius: 0.0,
                        bottom_radius: config.arrow_radius,
                        height: config.arrow_height,
                    })
                    .color(Color::WHITE)
                    .at(Vec3::Y * (length * 0.5)),
            );
            axes[axis.slot()] = node;
            arrows[axis.slot()] = arrow;
        }

        let origin = scene.spawn(
            root,
            NodeSpec::new(NodeRole::Origin)
                .primitive(Primitive::Sphere {
                    radius: config.axis_radius,
                })
                .color(Color::WHITE),
        );

        let mut grid_lines: [Vec<GridLine>; 6] = Default::default();
        for category in GridCategory::ALL {
            grid_lines[category.slot()] =
                build_grid_lines(scene, config, mapping, &axes, category);
        }

        let unit_planes = Plane::ALL.map(|plane| {
            let t = plane.traits();
            let w = mapping.axis(t.width_axis).spacing();
            let h = mapping.axis(t.height_axis).spacing();
            scene.spawn(
                root,
                NodeSpec::new(NodeRole::UnitPlane(plane))
                    .primitive(Primitive::Plane {
                        width: w,
                        height: h,
                    })
                    .color(config.unit_plane_color(plane))
                    .transform(Transform {
                        translation: (t.width_axis.direction() * w + t.height_axis.direction() * h)
                            * 0.5,
                        rotation: t.orientation,
                        ..Transform::IDENTITY
                    }),
            )
        });

        let walls = Plane::ALL.map(|plane| {
            let t = plane.traits();
            let w = mapping.axis(t.width_axis).length;
            let h = mapping.axis(t.height_axis).length;
            scene.spawn(
                root,
                NodeSpec::new(NodeRole::Wall(plane))
                    .primitive(Primitive::Cuboid {
                        width: w,
                        height: h,
                        length: config.wall_thickness,
                    })
                    .color(config.wall_color(plane))
                    .transform(Transform {
                        translation: (t.width_axis.direction() * w + t.height_axis.direction() * h)
                            * 0.5,
                        rotation: t.orientation,
                        ..Transform::IDENTITY
                    }),
            )
        });

        let total: usize = grid_lines.iter().map(Vec::len).sum();
        tracing::debug!(grid_lines = total, "axis frame built");

        Self {
            axes,
            arrows,
            origin,
            grid_lines,
            unit_planes,
            walls,
        }
    }

    pub fn axis_node(&self, axis: Axis) -> NodeId {
        self.axes[axis.slot()]
    }

    pub fn arrow_node(&self, axis: Axis) -> NodeId {
        self.arrows[axis.slot()]
    }

    pub fn origin_node(&self) -> NodeId {
        self.origin
    }

    pub fn unit_plane_node(&self, plane: Plane) -> NodeId {
        self.unit_planes[plane.slot()]
    }

    pub fn wall_node(&self, plane: Plane) -> NodeId {
        self.walls[plane.slot()]
    }

    pub fn grid_lines(&self, category: GridCategory) -> &[GridLine] {
        &self.grid_lines[category.slot()]
    }

    pub fn horizontal_grid_lines(&self, plane: Plane) -> &[GridLine] {
        self.grid_lines(GridCategory::new(plane, GridOrientation::Horizontal))
    }

    pub fn vertical_grid_lines(&self, plane: Plane) -> &[GridLine] {
        self.grid_lines(GridCategory::new(plane, GridOrientation::Vertical))
    }
}

fn build_grid_lines(
    scene: &mut Scene,
    config: &PlotConfig,
    mapping: &SceneMapping,
    axes: &[NodeId; 3],
    category: GridCategory,
) -> Vec<GridLine> {
    let t = category.traits();
    let owner = axes[t.owner.slot()];
    let length = mapping.axis(t.owner).length;
    let marks = mapping.axis(t.marks);
    let spacing = marks.spacing();
    let count = marks.gridline_count();

    (0..count)
        .map(|i| {
            let node = scene.spawn(
                owner,
                NodeSpec::new(NodeRole::GridLine(category, i))
                    .primitive(Primitive::Cylinder {
                        radius: config.grid_line_radius,
                        height: length,
                    })
                    .color(config.grid_color(category.plane))
                    .at(t.local_offset * (spacing * (i + 1) as f32)),
            );
            GridLine {
                category,
                index: i,
                node,
                position: scene.world_position(node).unwrap_or_default(),
                direction: t.owner.direction(),
                length,
            }
        })
        .collect()
}
