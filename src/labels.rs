//! Tick labels and axis titles.
//!
//! Both are discarded and regenerated as a whole on every rebuild.

use crate::core::{Axis, TextSpec};
use crate::frame::AxisFrame;
use crate::mapping::SceneMapping;
use crate::scene::{NodeId, NodeRole, NodeSpec, Primitive, Scene};
use crate::source::PlotDelegate;
use bevy::prelude::Transform;

#[derive(Debug, Default)]
pub struct LabelSet {
    tick_labels: Vec<NodeId>,
    titles: [Option<TextSpec>; 3],
    title_nodes: Vec<NodeId>,
}

impl LabelSet {
    pub fn set_title(&mut self, axis: Axis, title: TextSpec) {
        self.titles[axis.slot()] = Some(title);
    }

    pub fn title(&self, axis: Axis) -> Option<&TextSpec> {
        self.titles[axis.slot()].as_ref()
    }

    pub fn tick_label_nodes(&self) -> &[NodeId] {
        &self.tick_labels
    }

    pub fn title_nodes(&self) -> &[NodeId] {
        &self.title_nodes
    }

    pub fn rebuild(
        &mut self,
        scene: &mut Scene,
        frame: &AxisFrame,
        mapping: &SceneMapping,
        delegate: Option<&dyn PlotDelegate>,
    ) {
        for node in self.tick_labels.drain(..).chain(self.title_nodes.drain(..)) {
            scene.despawn(node);
        }
        let root = scene.root();

        if let Some(delegate) = delegate {
            for axis in Axis::ALL {
                let traits = axis.traits();
                for line in frame.grid_lines(traits.tick_category) {
                    let Some(spec) = delegate.text_at_tick(line.index, axis) else {
                        tracing::trace!(%axis, tick = line.index, "tick label declined");
                        continue;
                    };
                    let translation = line.far_end() + line.direction * spec.offset;
                    let node = scene.spawn(
                        root,
                        NodeSpec::new(NodeRole::TickLabel(axis, line.index))
                            .color(spec.color)
                            .primitive(Primitive::Text(spec))
                            .transform(Transform {
                                translation,
                                rotation: traits.tick_label_rotation,
                                ..Transform::IDENTITY
                            }),
                    );
                    self.tick_labels.push(node);
                }
            }
        }

        for axis in Axis::ALL {
            let Some(spec) = self.titles[axis.slot()].clone() else {
                continue;
            };
            let traits = axis.traits();
            let translation = traits.direction * (mapping.axis(axis).length * 0.5)
                + traits.outward * spec.offset;
            let node = scene.spawn(
                root,
                NodeSpec::new(NodeRole::AxisTitle(axis))
                    .color(spec.color)
                    .primitive(Primitive::Text(spec))
                    .transform(Transform {
                        translation,
                        rotation: traits.title_rotation,
                        ..Transform::IDENTITY
                    }),
            );
            self.title_nodes.push(node);
        }

        tracing::debug!(
            tick_labels = self.tick_labels.len(),
            titles = self.title_nodes.len(),
            "labels rebuilt"
        );
    }
}
