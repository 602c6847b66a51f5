//! Domain-to-scene coordinate mapping.

use crate::core::{Axis, DomainPoint};
use bevy_math::Vec3;

/// Maps a domain value onto a scene axis of length `axis_length`.
///
/// `domain_min` sits at the scene origin and `domain_max` at `axis_length`.
/// Values outside the range extrapolate linearly. `domain_max == domain_min`
/// is the caller's responsibility; [`crate::config::PlotConfig::validate`]
/// rejects such configurations before any mapping happens.
#[inline]
pub fn scene_coordinate(value: f32, domain_min: f32, domain_max: f32, axis_length: f32) -> f32 {
    scale_length(value - domain_min, domain_min, domain_max, axis_length)
}

/// Scales a length in domain units (e.g. a tick interval) to scene units.
#[inline]
pub fn scale_length(delta: f32, domain_min: f32, domain_max: f32, axis_length: f32) -> f32 {
    delta * (axis_length / (domain_max - domain_min))
}

/// Number of gridlines of `spacing` that fit on an axis of `length`.
///
/// `floor(length / spacing)`, tolerant of the last line landing a rounding
/// error short of the axis end.
pub fn gridline_count(length: f32, spacing: f32) -> usize {
    if !(spacing > 0.0) || !length.is_finite() || length <= 0.0 {
        return 0;
    }
    let ratio = length / spacing;
    (ratio + ratio * 4.0 * f32::EPSILON).floor() as usize
}

/// Most gridlines one axis may carry. Each becomes a scene node in two
/// planes, so configurations above this are rejected.
pub const MAX_GRIDLINES_PER_AXIS: usize = 1_000;

/// Domain range, scene length and tick interval of one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScale {
    pub min: f32,
    pub max: f32,
    pub length: f32,
    pub tick_interval: f32,
}

impl AxisScale {
    #[inline]
    pub fn to_scene(&self, value: f32) -> f32 {
        scene_coordinate(value, self.min, self.max, self.length)
    }

    #[inline]
    pub fn scale_length(&self, delta: f32) -> f32 {
        scale_length(delta, self.min, self.max, self.length)
    }

    /// Scene distance between neighbouring gridlines.
    #[inline]
    pub fn spacing(&self) -> f32 {
        self.scale_length(self.tick_interval)
    }

    pub fn gridline_count(&self) -> usize {
        gridline_count(self.length, self.spacing())
    }
}

/// The three axis scales of a plot space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneMapping {
    pub axes: [AxisScale; 3],
}

impl SceneMapping {
    #[inline]
    pub fn axis(&self, axis: Axis) -> &AxisScale {
        &self.axes[axis.slot()]
    }

    pub fn to_scene(&self, p: &DomainPoint) -> Vec3 {
        Vec3::new(
            self.axis(Axis::X).to_scene(p.x),
            self.axis(Axis::Y).to_scene(p.y),
            self.axis(Axis::Z).to_scene(p.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_domain_maps_endpoints() {
        assert_eq!(scene_coordinate(-5.0, -5.0, 15.0, 4.0), 0.0);
        assert!((scene_coordinate(15.0, -5.0, 15.0, 4.0) - 4.0).abs() < 1e-6);
        assert!((scene_coordinate(5.0, -5.0, 15.0, 4.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn gridline_count_survives_inexact_spacing() {
        // 3 * 7 / 15 is not representable; the fifth line still fits.
        let spacing = scale_length(3.0, 0.0, 15.0, 7.0);
        assert_eq!(gridline_count(7.0, spacing), 5);
        assert_eq!(gridline_count(5.0, 1.0), 5);
        assert_eq!(gridline_count(5.0, 2.0), 2);
        assert_eq!(gridline_count(5.0, 0.0), 0);
    }
}
