//! Plot space configuration.

use crate::core::{Axis, Color, Plane};
use crate::mapping::{AxisScale, MAX_GRIDLINES_PER_AXIS, SceneMapping};
use crate::{PlotError, Result};
use error_stack::{Report, ResultExt, report};
use serde::{Deserialize, Serialize};

/// Geometry, scaling and colors of a plot space. Fixed once the space is built;
/// unit-plane and wall appearance can still be toggled afterwards through
/// [`crate::space::PlotSpace`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub x_axis_length: f32,
    pub y_axis_length: f32,
    pub z_axis_length: f32,

    pub axis_radius: f32,
    pub grid_line_radius: f32,
    pub arrow_radius: f32,
    pub arrow_height: f32,

    pub x_tick_interval: f32,
    pub y_tick_interval: f32,
    pub z_tick_interval: f32,

    pub x_domain_min: f32,
    pub x_domain_max: f32,
    pub y_domain_min: f32,
    pub y_domain_max: f32,
    pub z_domain_min: f32,
    pub z_domain_max: f32,

    pub xy_grid_color: Color,
    pub xz_grid_color: Color,
    pub yz_grid_color: Color,

    pub xy_unit_plane_color: Color,
    pub xz_unit_plane_color: Color,
    pub yz_unit_plane_color: Color,

    pub xy_wall_color: Color,
    pub xz_wall_color: Color,
    pub yz_wall_color: Color,
    pub wall_thickness: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let unit_plane = Color::WHITE.with_a(0.3);
        let wall = Color::LIGHT_GRAY.with_a(0.6);
        Self {
            x_axis_length: 7.0,
            y_axis_length: 6.0,
            z_axis_length: 4.0,
            axis_radius: 0.035,
            grid_line_radius: 0.009,
            arrow_radius: 0.15,
            arrow_height: 0.3,
            x_tick_interval: 3.0,
            y_tick_interval: 5.0,
            z_tick_interval: 3.0,
            x_domain_min: 0.0,
            x_domain_max: 15.0,
            y_domain_min: 0.0,
            y_domain_max: 15.0,
            z_domain_min: 0.0,
            z_domain_max: 15.0,
            xy_grid_color: Color::WHITE,
            xz_grid_color: Color::WHITE,
            yz_grid_color: Color::WHITE,
            xy_unit_plane_color: unit_plane,
            xz_unit_plane_color: unit_plane,
            yz_unit_plane_color: unit_plane,
            xy_wall_color: wall,
            xz_wall_color: wall,
            yz_wall_color: wall,
            wall_thickness: 0.01,
        }
    }
}

impl PlotConfig {
    /// Parses a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .change_context(PlotError::Parse)
            .attach("expected a JSON object of plot configuration fields")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).change_context(PlotError::Parse)
    }

    pub fn axis_length(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x_axis_length,
            Axis::Y => self.y_axis_length,
            Axis::Z => self.z_axis_length,
        }
    }

    pub fn tick_interval(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x_tick_interval,
            Axis::Y => self.y_tick_interval,
            Axis::Z => self.z_tick_interval,
        }
    }

    pub fn domain(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::X => (self.x_domain_min, self.x_domain_max),
            Axis::Y => (self.y_domain_min, self.y_domain_max),
            Axis::Z => (self.z_domain_min, self.z_domain_max),
        }
    }

    pub fn grid_color(&self, plane: Plane) -> Color {
        match plane {
            Plane::XY => self.xy_grid_color,
            Plane::XZ => self.xz_grid_color,
            Plane::YZ => self.yz_grid_color,
        }
    }

    pub fn unit_plane_color(&self, plane: Plane) -> Color {
        match plane {
            Plane::XY => self.xy_unit_plane_color,
            Plane::XZ => self.xz_unit_plane_color,
            Plane::YZ => self.yz_unit_plane_color,
        }
    }

    pub fn wall_color(&self, plane: Plane) -> Color {
        match plane {
            Plane::XY => self.xy_wall_color,
            Plane::XZ => self.xz_wall_color,
            Plane::YZ => self.yz_wall_color,
        }
    }

    /// Scale of one axis, without validation.
    pub fn axis_scale(&self, axis: Axis) -> AxisScale {
        let (min, max) = self.domain(axis);
        AxisScale {
            min,
            max,
            length: self.axis_length(axis),
            tick_interval: self.tick_interval(axis),
        }
    }

    /// Checks every invariant and returns the resulting mapping.
    pub fn validate(&self) -> Result<SceneMapping> {
        for axis in Axis::ALL {
            let scale = self.axis_scale(axis);

            if !(scale.min.is_finite() && scale.max.is_finite()) || scale.max <= scale.min {
                return Err(report!(PlotError::DegenerateDomain(axis))
                    .attach(format!("domain min: {}", scale.min))
                    .attach(format!("domain max: {}", scale.max)));
            }
            if !(scale.tick_interval.is_finite() && scale.tick_interval > 0.0) {
                return Err(report!(PlotError::InvalidTickInterval(axis))
                    .attach(format!("tick interval: {}", scale.tick_interval)));
            }
            positive(&format!("{axis} axis length"), scale.length)?;

            let lines = scale.gridline_count();
            if lines > MAX_GRIDLINES_PER_AXIS {
                return Err(report!(PlotError::InvalidTickInterval(axis))
                    .attach(format!("tick interval: {}", scale.tick_interval))
                    .attach(format!(
                        "{lines} gridlines, at most {MAX_GRIDLINES_PER_AXIS} allowed"
                    )));
            }
        }

        positive("axis radius", self.axis_radius)?;
        positive("grid line radius", self.grid_line_radius)?;
        positive("arrow radius", self.arrow_radius)?;
        positive("arrow height", self.arrow_height)?;
        non_negative("wall thickness", self.wall_thickness)?;

        Ok(self.mapping())
    }

    /// Mapping for the current values. Call [`Self::validate`] first when the
    /// values come from outside.
    pub fn mapping(&self) -> SceneMapping {
        SceneMapping {
            axes: Axis::ALL.map(|axis| self.axis_scale(axis)),
        }
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and non-negative, got {value}")))
    }
}

fn invalid(message: String) -> Report<PlotError> {
    report!(PlotError::InvalidConfig).attach(message)
}
