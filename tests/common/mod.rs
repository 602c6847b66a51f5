#![allow(dead_code)]

use bevy_math::{Vec2, Vec3};
use parking_lot::Mutex;
use plot_space::config::PlotConfig;
use plot_space::core::{Axis, Color, ConnectionSpec, DomainPoint, Marker, TextSpec};
use plot_space::scene::{HitTest, NodeId, NodeRole, Scene};
use plot_space::source::{PlotDataSource, PlotDelegate};

pub const EPS: f32 = 1e-4;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

pub fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPS
}

/// Every axis: domain 0..10 over 5 scene units, ticks every 2.
pub fn cube_config() -> PlotConfig {
    PlotConfig {
        x_axis_length: 5.0,
        y_axis_length: 5.0,
        z_axis_length: 5.0,
        x_domain_max: 10.0,
        y_domain_max: 10.0,
        z_domain_max: 10.0,
        x_tick_interval: 2.0,
        y_tick_interval: 2.0,
        z_tick_interval: 2.0,
        ..PlotConfig::default()
    }
}

pub fn count_roles(scene: &Scene, f: impl Fn(&NodeRole) -> bool) -> usize {
    scene.count_where(f)
}

pub fn projection_lines(scene: &Scene) -> usize {
    scene.count_where(|r| matches!(r, NodeRole::Projection { .. }))
}

/// Hit test that always reports the same node.
pub struct FixedHit(pub Option<NodeId>);

impl HitTest for FixedHit {
    fn hit_test(&self, _screen: Vec2) -> Option<NodeId> {
        self.0
    }
}

/// A collaborator that declines on request and records every callback.
#[derive(Default)]
pub struct Recorder {
    pub points: Mutex<Vec<DomainPoint>>,
    pub connections: Mutex<Vec<Option<(usize, usize)>>>,
    /// Indices whose marker is declined.
    pub no_marker: Mutex<Vec<usize>>,
    /// Tick indices (per axis) that get no label.
    pub unlabeled: Mutex<Vec<(Axis, usize)>>,
    /// Connection indices whose spec is declined.
    pub no_spec: Mutex<Vec<usize>>,
    pub connection_requests: Mutex<Vec<usize>>,
    pub labels_enabled: Mutex<bool>,
    pub selected: Mutex<Vec<usize>>,
    pub point_requests: Mutex<Vec<usize>>,
}

impl Recorder {
    pub fn with_points(points: &[[f32; 3]]) -> Self {
        let r = Self::default();
        *r.points.lock() = points.iter().map(|p| DomainPoint::from(*p)).collect();
        r
    }

    pub fn push(&self, p: [f32; 3]) {
        self.points.lock().push(DomainPoint::from(p));
    }

    pub fn connect(&self, pair: Option<(usize, usize)>) {
        self.connections.lock().push(pair);
    }
}

impl PlotDataSource for Recorder {
    fn number_of_points(&self) -> usize {
        self.points.lock().len()
    }

    fn number_of_connections(&self) -> usize {
        self.connections.lock().len()
    }
}

impl PlotDelegate for Recorder {
    fn point(&self, index: usize) -> DomainPoint {
        self.point_requests.lock().push(index);
        self.points.lock()[index]
    }

    fn marker(&self, index: usize) -> Option<Marker> {
        if self.no_marker.lock().contains(&index) {
            None
        } else {
            Some(Marker::sphere(0.2, Color::RED))
        }
    }

    fn points_to_connect(&self, index: usize) -> Option<(usize, usize)> {
        self.connections.lock().get(index).copied().flatten()
    }

    fn connection(&self, index: usize) -> Option<ConnectionSpec> {
        self.connection_requests.lock().push(index);
        if self.no_spec.lock().contains(&index) {
            None
        } else {
            Some(ConnectionSpec::default())
        }
    }

    fn text_at_tick(&self, index: usize, axis: Axis) -> Option<TextSpec> {
        if !*self.labels_enabled.lock() || self.unlabeled.lock().contains(&(axis, index)) {
            return None;
        }
        Some(TextSpec::new(format!("{axis}{index}")))
    }

    fn did_select(&self, index: usize) {
        self.selected.lock().push(index);
    }
}
