//! Retained scene description shared by every builder in the plot space.
//!
//! Nodes live in an arena keyed by [`NodeId`]. Ids are never reused, so a host
//! can map them one-to-one onto its own objects. Every structural or material
//! change is queued in a journal that hosts drain once per frame.

use crate::core::{Axis, Color, GridCategory, Plane, TextAnchor, TextSpec};
use bevy::prelude::Transform;
use bevy_math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Geometry attached to a node. Y-aligned primitives (cylinder, cone) are
/// centered on their midpoint; planes lie in local XY; boxes are centered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Cylinder {
        radius: f32,
        height: f32,
    },
    Cone {
        top_radius: f32,
        bottom_radius: f32,
        height: f32,
    },
    Sphere {
        radius: f32,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Cuboid {
        width: f32,
        height: f32,
        length: f32,
    },
    Text(TextSpec),
}

impl Primitive {
    /// Local-space bounds as (min, max) corners.
    pub fn local_bounds(&self) -> (Vec3, Vec3) {
        let half = match self {
            Primitive::Cylinder { radius, height } => Vec3::new(*radius, height * 0.5, *radius),
            Primitive::Cone {
                top_radius,
                bottom_radius,
                height,
            } => {
                let r = top_radius.max(*bottom_radius);
                Vec3::new(r, height * 0.5, r)
            }
            Primitive::Sphere { radius } => Vec3::splat(*radius),
            Primitive::Plane { width, height } => Vec3::new(width * 0.5, height * 0.5, 0.0),
            Primitive::Cuboid {
                width,
                height,
                length,
            } => Vec3::new(width * 0.5, height * 0.5, length * 0.5),
            Primitive::Text(spec) => {
                // Rough glyph box: 0.6 em per character.
                let width = spec.text.chars().count() as f32 * spec.font_size * 0.6;
                let half = Vec3::new(width * 0.5, spec.font_size * 0.5, 0.0);
                return match spec.anchor {
                    TextAnchor::Center => (-half, half),
                    TextAnchor::Right => (
                        Vec3::new(-width, -half.y, 0.0),
                        Vec3::new(0.0, half.y, 0.0),
                    ),
                };
            }
        };
        (-half, half)
    }
}

/// What a node stands for. Hosts use it to tag their objects and the facade
/// uses it to resolve hit-test results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    Root,
    Axis(Axis),
    Arrow(Axis),
    Origin,
    GridLine(GridCategory, usize),
    UnitPlane(Plane),
    Wall(Plane),
    PlotRoot,
    Point(usize),
    Connection(usize),
    Projection { point: usize, axis: Axis },
    TickLabel(Axis, usize),
    AxisTitle(Axis),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub role: NodeRole,
    pub primitive: Option<Primitive>,
    pub color: Option<Color>,
    pub transform: Transform,
    pub visible: bool,
}

/// Everything needed to spawn a node except its parent.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    role: NodeRole,
    primitive: Option<Primitive>,
    color: Option<Color>,
    transform: Transform,
}

impl NodeSpec {
    pub fn new(role: NodeRole) -> Self {
        Self {
            role,
            primitive: None,
            color: None,
            transform: Transform::IDENTITY,
        }
    }

    pub fn primitive(mut self, primitive: Primitive) -> Self {
        self.primitive = Some(primitive);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneChange {
    Added(NodeId),
    Removed(NodeId),
    Updated(NodeId),
}

/// Pending changes since the last drain, at most one per node.
///
/// A node added and removed between two drains leaves nothing behind, and
/// updates to a node not yet seen by the host fold into its `Added`. The
/// pending set is bounded by the live nodes plus the nodes removed since the
/// host last drained.
#[derive(Debug, Default)]
struct Journal {
    order: VecDeque<NodeId>,
    pending: HashMap<NodeId, SceneChange>,
}

impl Journal {
    fn added(&mut self, id: NodeId) {
        self.pending.insert(id, SceneChange::Added(id));
        self.order.push_back(id);
    }

    fn removed(&mut self, id: NodeId) {
        match self.pending.entry(id) {
            Entry::Occupied(e) if matches!(e.get(), SceneChange::Added(_)) => {
                e.remove();
                self.compact();
            }
            Entry::Occupied(mut e) => {
                e.insert(SceneChange::Removed(id));
            }
            Entry::Vacant(e) => {
                e.insert(SceneChange::Removed(id));
                self.order.push_back(id);
            }
        }
    }

    fn updated(&mut self, id: NodeId) {
        if let Entry::Vacant(e) = self.pending.entry(id) {
            e.insert(SceneChange::Updated(id));
            self.order.push_back(id);
        }
    }

    /// Drops order slots left behind by cancelled additions.
    fn compact(&mut self) {
        if self.order.len() > 2 * self.pending.len() + 64 {
            let pending = &self.pending;
            self.order.retain(|id| pending.contains_key(id));
        }
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn drain(&mut self) -> Vec<SceneChange> {
        let mut pending = std::mem::take(&mut self.pending);
        self.order
            .drain(..)
            .filter_map(|id| pending.remove(&id))
            .collect()
    }
}

/// Resolves a screen point to the frontmost scene node under it.
pub trait HitTest {
    fn hit_test(&self, screen: Vec2) -> Option<NodeId>;
}

#[derive(Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    root: NodeId,
    next_id: u64,
    changes: Journal,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            SceneNode {
                id: root,
                parent: None,
                children: vec![],
                role: NodeRole::Root,
                primitive: None,
                color: None,
                transform: Transform::IDENTITY,
                visible: true,
            },
        );
        let mut changes = Journal::default();
        changes.added(root);
        Self {
            nodes,
            root,
            next_id: 1,
            changes,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Number of live nodes whose role satisfies `f`.
    pub fn count_where(&self, f: impl Fn(&NodeRole) -> bool) -> usize {
        self.nodes.values().filter(|n| f(&n.role)).count()
    }

    /// Adds a node under `parent`. A missing parent falls back to the root.
    pub fn spawn(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let parent = if self.nodes.contains_key(&parent) {
            parent
        } else {
            tracing::warn!(parent = parent.0, "spawn under missing parent, using root");
            self.root
        };

        let id = NodeId(self.next_id);
        self.next_id += 1;

        self.nodes.insert(
            id,
            SceneNode {
                id,
                parent: Some(parent),
                children: vec![],
                role: spec.role,
                primitive: spec.primitive,
                color: spec.color,
                transform: spec.transform,
                visible: true,
            },
        );
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        self.changes.added(id);
        id
    }

    /// Removes `id` and its whole subtree. The root cannot be removed.
    pub fn despawn(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if let Some(parent) = node.parent
            && let Some(p) = self.nodes.get_mut(&parent)
        {
            p.children.retain(|c| *c != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&next) {
                stack.extend(removed.children);
                self.changes.removed(next);
            }
        }
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id)
            && node.visible != visible
        {
            node.visible = visible;
            self.changes.updated(id);
        }
    }

    pub fn set_color(&mut self, id: NodeId, color: Color) {
        if let Some(node) = self.nodes.get_mut(&id)
            && node.color != Some(color)
        {
            node.color = Some(color);
            self.changes.updated(id);
        }
    }

    /// Transform of `id` relative to the scene root.
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let mut node = self.nodes.get(&id)?;
        let mut world = node.transform;
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(&p)) {
            world = parent.transform.mul_transform(world);
            node = parent;
        }
        Some(world)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_transform(id).map(|t| t.translation)
    }

    /// Visible when the node and all its ancestors are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cur = self.nodes.get(&id);
        while let Some(node) = cur {
            if !node.visible {
                return false;
            }
            cur = node.parent.and_then(|p| self.nodes.get(&p));
        }
        true
    }

    /// Takes the changes recorded since the last drain, oldest first, with
    /// at most one entry per node.
    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        self.changes.drain()
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Number of changes waiting for the next drain.
    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }

    /// Frontmost visible node with geometry hit by the ray `origin + t * direction`.
    /// Text nodes are not pickable.
    ///
    /// Each node is tested against its local bounds in its own frame, so thin
    /// rotated gridlines and large walls are not over-reported.
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3) -> Option<NodeId> {
        let mut best: Option<(f32, NodeId)> = None;

        for node in self.nodes.values() {
            let Some(primitive) = &node.primitive else {
                continue;
            };
            if matches!(primitive, Primitive::Text(_)) {
                continue;
            }
            if !self.is_visible(node.id) {
                continue;
            }
            let Some(world) = self.world_transform(node.id) else {
                continue;
            };

            let inv = world.compute_affine().inverse();
            let local_origin = inv.transform_point3(origin);
            let local_dir = inv.transform_vector3(direction);

            let hit = match primitive {
                Primitive::Sphere { radius } => ray_sphere(local_origin, local_dir, *radius),
                other => {
                    let (min, max) = other.local_bounds();
                    ray_aabb(local_origin, local_dir, min, max)
                }
            };

            if let Some(t) = hit
                && best.is_none_or(|(bt, _)| t < bt)
            {
                best = Some((t, node.id));
            }
        }

        best.map(|(_, id)| id)
    }
}

fn ray_sphere(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    let a = dir.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = origin.dot(dir);
    let c = origin.length_squared() - radius * radius;
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t0 = (-b - sq) / a;
    let t1 = (-b + sq) / a;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

// Slab test. Zero-thickness boxes (planes, text) still hit when the ray
// crosses them.
fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for i in 0..3 {
        let (o, d, lo, hi) = (origin[i], dir[i], min[i], max[i]);
        if d.abs() < 1e-12 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let mut t0 = (lo - o) / d;
        let mut t1 = (hi - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        None
    } else {
        Some(t_near.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Quat;

    #[test]
    fn despawn_removes_subtree_and_journals_each_node() {
        let mut scene = Scene::new();
        scene.drain_changes();
        let root = scene.root();
        let group = scene.spawn(root, NodeSpec::new(NodeRole::PlotRoot));
        let child = scene.spawn(
            group,
            NodeSpec::new(NodeRole::Point(0)).primitive(Primitive::Sphere { radius: 0.1 }),
        );
        scene.drain_changes();

        scene.despawn(group);
        assert!(!scene.contains(group));
        assert!(!scene.contains(child));
        assert!(scene.get(root).is_some_and(|r| r.children.is_empty()));

        let changes = scene.drain_changes();
        assert!(changes.contains(&SceneChange::Removed(group)));
        assert!(changes.contains(&SceneChange::Removed(child)));
    }

    #[test]
    fn journal_folds_changes_per_node() {
        let mut scene = Scene::new();
        scene.drain_changes();
        let root = scene.root();

        let seen = scene.spawn(root, NodeSpec::new(NodeRole::PlotRoot));
        scene.drain_changes();

        let transient = scene.spawn(root, NodeSpec::new(NodeRole::Point(0)));
        scene.set_visible(transient, false);
        scene.despawn(transient);

        let fresh = scene.spawn(root, NodeSpec::new(NodeRole::Point(1)));
        scene.set_color(fresh, Color::RED);

        scene.set_visible(seen, false);
        scene.set_color(seen, Color::BLUE);

        assert_eq!(
            scene.drain_changes(),
            vec![SceneChange::Added(fresh), SceneChange::Updated(seen)]
        );

        scene.set_visible(seen, true);
        scene.despawn(seen);
        assert_eq!(scene.drain_changes(), vec![SceneChange::Removed(seen)]);
        assert!(!scene.has_changes());
    }

    #[test]
    fn world_transform_composes_parents() {
        let mut scene = Scene::new();
        let parent = scene.spawn(
            scene.root(),
            NodeSpec::new(NodeRole::Axis(Axis::X)).transform(Transform {
                translation: Vec3::new(2.0, 0.0, 0.0),
                rotation: Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2),
                ..Transform::IDENTITY
            }),
        );
        let child = scene.spawn(
            parent,
            NodeSpec::new(NodeRole::Arrow(Axis::X)).at(Vec3::new(0.0, 2.0, 0.0)),
        );
        let p = scene.world_position(child).unwrap();
        assert!((p - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5, "got {p:?}");
    }

    #[test]
    fn ray_cast_prefers_nearest_and_skips_hidden() {
        let mut scene = Scene::new();
        let root = scene.root();
        let near = scene.spawn(
            root,
            NodeSpec::new(NodeRole::Point(0))
                .primitive(Primitive::Sphere { radius: 0.5 })
                .at(Vec3::new(0.0, 0.0, 5.0)),
        );
        let far = scene.spawn(
            root,
            NodeSpec::new(NodeRole::Wall(Plane::XY)).primitive(Primitive::Cuboid {
                width: 4.0,
                height: 4.0,
                length: 0.01,
            }),
        );

        let origin = Vec3::new(0.0, 0.0, 10.0);
        assert_eq!(scene.ray_cast(origin, Vec3::NEG_Z), Some(near));

        scene.set_visible(near, false);
        assert_eq!(scene.ray_cast(origin, Vec3::NEG_Z), Some(far));

        assert_eq!(scene.ray_cast(origin, Vec3::Z), None);
    }
}
