//! Plotted points and connections, bound to a data source and delegate.

use crate::core::{ConnectionSpec, DomainPoint, Marker};
use crate::mapping::SceneMapping;
use crate::scene::{NodeId, NodeRole, NodeSpec, Primitive, Scene};
use crate::source::{PlotDataSource, PlotDelegate};
use bevy::prelude::Transform;
use bevy_math::{Quat, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct PlottedPoint {
    pub index: usize,
    pub domain: DomainPoint,
    /// Scene position of the point.
    pub position: Vec3,
    pub marker: Option<Marker>,
    pub node: NodeId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    /// Index the delegate was asked about.
    pub index: usize,
    pub p0: usize,
    pub p1: usize,
    pub spec: ConnectionSpec,
    pub node: NodeId,
}

/// Transform of a Y-aligned cylinder spanning `a` to `b`.
pub fn segment_transform(a: Vec3, b: Vec3) -> (Transform, f32) {
    let delta = b - a;
    let length = delta.length();
    let rotation = if length > f32::EPSILON {
        Quat::from_rotation_arc(Vec3::Y, delta / length)
    } else {
        Quat::IDENTITY
    };
    (
        Transform {
            translation: (a + b) * 0.5,
            rotation,
            ..Transform::IDENTITY
        },
        length,
    )
}

#[derive(Debug)]
pub struct PlotBinder {
    plot_root: NodeId,
    points: Vec<PlottedPoint>,
    connections: Vec<Connection>,
    // Connection indices already asked for, including declined ones.
    processed_connections: usize,
}

impl PlotBinder {
    pub fn new(scene: &mut Scene) -> Self {
        Self {
            plot_root: scene.spawn(scene.root(), NodeSpec::new(NodeRole::PlotRoot)),
            points: Vec::new(),
            connections: Vec::new(),
            processed_connections: 0,
        }
    }

    pub fn plot_root(&self) -> NodeId {
        self.plot_root
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.connections.is_empty()
    }

    pub fn points(&self) -> &[PlottedPoint] {
        &self.points
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Point at `index`. Negative or out-of-range indices give `None`.
    pub fn point<I: TryInto<usize>>(&self, index: I) -> Option<&PlottedPoint> {
        self.points.get(index.try_into().ok()?)
    }

    /// Plotted connection at position `index` (in plotting order).
    pub fn connection<I: TryInto<usize>>(&self, index: I) -> Option<&Connection> {
        self.connections.get(index.try_into().ok()?)
    }

    /// Drops every point and connection under a fresh plot root.
    pub fn clear(&mut self, scene: &mut Scene) {
        scene.despawn(self.plot_root);
        self.plot_root = scene.spawn(scene.root(), NodeSpec::new(NodeRole::PlotRoot));
        self.points.clear();
        self.connections.clear();
        self.processed_connections = 0;
    }

    /// Clears, then plots everything the collaborators report.
    pub fn reload(
        &mut self,
        scene: &mut Scene,
        mapping: &SceneMapping,
        source: Option<&dyn PlotDataSource>,
        delegate: Option<&dyn PlotDelegate>,
    ) {
        self.clear(scene);
        let (Some(source), Some(delegate)) = (source, delegate) else {
            tracing::debug!("reload without data source or delegate, plot cleared");
            return;
        };
        let points = self.append_points(scene, mapping, source, delegate);
        let connections = self.append_connections(scene, source, delegate);
        tracing::debug!(points, connections, "plot reloaded");
    }

    /// Plots the points past the current count. Returns how many were added.
    pub fn append_points(
        &mut self,
        scene: &mut Scene,
        mapping: &SceneMapping,
        source: &dyn PlotDataSource,
        delegate: &dyn PlotDelegate,
    ) -> usize {
        let current = self.points.len();
        let count = source.number_of_points();
        if count < current {
            tracing::warn!(current, count, "point count shrank, ignoring");
            return 0;
        }

        for index in current..count {
            let domain = delegate.point(index);
            let position = mapping.to_scene(&domain);
            let marker = delegate.marker(index);

            let mut spec = NodeSpec::new(NodeRole::Point(index)).at(position);
            if let Some(m) = &marker {
                spec = spec.primitive(m.primitive.clone()).color(m.color);
            } else {
                tracing::trace!(index, "no marker, point plotted without geometry");
            }
            let node = scene.spawn(self.plot_root, spec);

            self.points.push(PlottedPoint {
                index,
                domain,
                position,
                marker,
                node,
            });
        }
        count - current
    }

    /// Plots the connections past the processed count. Returns how many were
    /// drawn; declined or dangling connections are skipped for good.
    pub fn append_connections(
        &mut self,
        scene: &mut Scene,
        source: &dyn PlotDataSource,
        delegate: &dyn PlotDelegate,
    ) -> usize {
        let current = self.processed_connections;
        let count = source.number_of_connections();
        if count < current {
            tracing::warn!(current, count, "connection count shrank, ignoring");
            return 0;
        }

        let before = self.connections.len();
        for index in current..count {
            self.processed_connections = index + 1;

            let (Some((p0, p1)), Some(spec)) =
                (delegate.points_to_connect(index), delegate.connection(index))
            else {
                tracing::trace!(index, "connection declined");
                continue;
            };
            let (Some(a), Some(b)) = (self.points.get(p0), self.points.get(p1)) else {
                tracing::warn!(
                    index,
                    p0,
                    p1,
                    points = self.points.len(),
                    "connection references a missing point, skipped"
                );
                continue;
            };

            let (transform, height) = segment_transform(a.position, b.position);
            let node = scene.spawn(
                self.plot_root,
                NodeSpec::new(NodeRole::Connection(index))
                    .primitive(Primitive::Cylinder {
                        radius: spec.radius,
                        height,
                    })
                    .color(spec.color)
                    .transform(transform),
            );
            self.connections.push(Connection {
                index,
                p0,
                p1,
                spec,
                node,
            });
        }
        self.connections.len() - before
    }
}
