//! Highlighted points and their projection lines.

use crate::binder::PlottedPoint;
use crate::core::{Axis, Color};
use crate::scene::{NodeId, NodeRole, NodeSpec, Primitive, Scene};
use bevy::prelude::Transform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighlightSettings {
    pub enabled: bool,
    /// When false, a new selection clears earlier highlights first.
    pub multiple: bool,
    pub radius: f32,
    pub color: Color,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            multiple: false,
            radius: 0.01,
            color: Color::WHITE,
        }
    }
}

/// Set of highlighted point indices. Each entry owns three lines dropping the
/// point onto the xy, xz and yz planes.
#[derive(Debug, Default)]
pub struct Highlights {
    entries: BTreeMap<usize, [NodeId; 3]>,
}

impl Highlights {
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Projection line nodes of every highlighted point.
    pub fn line_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.values().flatten().copied()
    }

    /// Highlights `point`. Returns false if it already was.
    pub fn highlight(
        &mut self,
        scene: &mut Scene,
        point: &PlottedPoint,
        radius: f32,
        color: Color,
    ) -> bool {
        if self.entries.contains_key(&point.index) {
            return false;
        }
        let root = scene.root();
        let p = point.position;

        // One line per plane, running along that plane's normal axis.
        let lines = Axis::ALL.map(|axis| {
            let c = axis.component(p);
            scene.spawn(
                root,
                NodeSpec::new(NodeRole::Projection {
                    point: point.index,
                    axis,
                })
                .primitive(Primitive::Cylinder {
                    radius,
                    height: c.abs(),
                })
                .color(color)
                .transform(Transform {
                    translation: p - axis.direction() * (c * 0.5),
                    rotation: axis.traits().cylinder_rotation,
                    ..Transform::IDENTITY
                }),
            )
        });
        self.entries.insert(point.index, lines);
        tracing::debug!(index = point.index, "point highlighted");
        true
    }

    pub fn clear(&mut self, scene: &mut Scene) {
        for node in self.entries.values().flatten() {
            scene.despawn(*node);
        }
        self.entries.clear();
    }
}
