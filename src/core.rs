use crate::scene::Primitive;
use bevy_math::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn with_a(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.5, 0.0);
    pub const LIGHT_GRAY: Self = Self::rgb(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
    /// Translucent light text, used for axis titles.
    pub const LIGHT_TEXT: Self = Self::rgba(1.0, 1.0, 1.0, 0.6);
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::linear_rgba(c.r, c.g, c.b, c.a)
    }
}

/// One of the three axes of the plot space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Fixed per-axis constants. Everything that used to be a per-axis branch in
/// placement or rotation code is read from here.
#[derive(Clone, Copy, Debug)]
pub struct AxisTraits {
    pub direction: Vec3,
    /// Rotates a Y-aligned primitive (cylinder, cone) onto the axis.
    pub cylinder_rotation: Quat,
    /// Gridline category whose lines carry this axis's tick labels.
    pub tick_category: GridCategory,
    pub tick_label_rotation: Quat,
    pub title_rotation: Quat,
    /// Direction pointing away from the axis frame, used to offset titles.
    pub outward: Vec3,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn traits(self) -> AxisTraits {
        match self {
            Axis::X => AxisTraits {
                direction: Vec3::X,
                cylinder_rotation: Quat::from_rotation_z(-FRAC_PI_2),
                tick_category: GridCategory::new(Plane::XZ, GridOrientation::Vertical),
                tick_label_rotation: Quat::from_rotation_x(-FRAC_PI_2),
                title_rotation: Quat::IDENTITY,
                outward: Vec3::NEG_Y,
            },
            Axis::Y => AxisTraits {
                direction: Vec3::Y,
                cylinder_rotation: Quat::IDENTITY,
                tick_category: GridCategory::new(Plane::YZ, GridOrientation::Horizontal),
                tick_label_rotation: Quat::IDENTITY,
                title_rotation: Quat::from_rotation_z(FRAC_PI_2),
                outward: Vec3::NEG_X,
            },
            Axis::Z => AxisTraits {
                direction: Vec3::Z,
                cylinder_rotation: Quat::from_rotation_x(FRAC_PI_2),
                tick_category: GridCategory::new(Plane::XZ, GridOrientation::Horizontal),
                tick_label_rotation: Quat::from_rotation_x(-FRAC_PI_2),
                title_rotation: Quat::from_rotation_y(FRAC_PI_2),
                outward: Vec3::NEG_Y,
            },
        }
    }

    #[inline]
    pub fn direction(self) -> Vec3 {
        self.traits().direction
    }

    #[inline]
    pub fn negative_direction(self) -> Vec3 {
        -self.traits().direction
    }

    /// Component of `v` along this axis.
    #[inline]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// One of the three coordinate planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

#[derive(Clone, Copy, Debug)]
pub struct PlaneTraits {
    /// Axis spanned by the local width of planes and walls.
    pub width_axis: Axis,
    /// Axis spanned by the local height of planes and walls.
    pub height_axis: Axis,
    pub normal_axis: Axis,
    /// Rotates an XY-aligned plane or box into this plane.
    pub orientation: Quat,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    pub fn traits(self) -> PlaneTraits {
        match self {
            Plane::XY => PlaneTraits {
                width_axis: Axis::X,
                height_axis: Axis::Y,
                normal_axis: Axis::Z,
                orientation: Quat::IDENTITY,
            },
            Plane::XZ => PlaneTraits {
                width_axis: Axis::X,
                height_axis: Axis::Z,
                normal_axis: Axis::Y,
                orientation: Quat::from_rotation_x(-FRAC_PI_2),
            },
            Plane::YZ => PlaneTraits {
                width_axis: Axis::Z,
                height_axis: Axis::Y,
                normal_axis: Axis::X,
                orientation: Quat::from_rotation_y(FRAC_PI_2),
            },
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Plane::XY => 0,
            Plane::XZ => 1,
            Plane::YZ => 2,
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::XY => write!(f, "xy"),
            Plane::XZ => write!(f, "xz"),
            Plane::YZ => write!(f, "yz"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridOrientation {
    Horizontal,
    Vertical,
}

/// One of the six gridline families: a plane plus the direction lines run in
/// that plane's local frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCategory {
    pub plane: Plane,
    pub orientation: GridOrientation,
}

#[derive(Clone, Copy, Debug)]
pub struct GridTraits {
    /// Axis node the lines hang from. Lines run along it and span its length.
    pub owner: Axis,
    /// Axis whose ticks the lines mark. Spacing and count come from it.
    pub marks: Axis,
    /// Offset direction in the owner node's local frame.
    pub local_offset: Vec3,
}

impl GridCategory {
    pub const ALL: [GridCategory; 6] = [
        GridCategory::new(Plane::XY, GridOrientation::Horizontal),
        GridCategory::new(Plane::XY, GridOrientation::Vertical),
        GridCategory::new(Plane::XZ, GridOrientation::Horizontal),
        GridCategory::new(Plane::XZ, GridOrientation::Vertical),
        GridCategory::new(Plane::YZ, GridOrientation::Horizontal),
        GridCategory::new(Plane::YZ, GridOrientation::Vertical),
    ];

    pub const fn new(plane: Plane, orientation: GridOrientation) -> Self {
        Self { plane, orientation }
    }

    pub(crate) fn slot(self) -> usize {
        let o = match self.orientation {
            GridOrientation::Horizontal => 0,
            GridOrientation::Vertical => 1,
        };
        self.plane.slot() * 2 + o
    }

    // Offsets are expressed in the owner's local frame; the owner's rotation
    // carries them into the positive quadrant of the plane.
    pub fn traits(self) -> GridTraits {
        use GridOrientation::*;
        let (owner, marks, local_offset) = match (self.plane, self.orientation) {
            (Plane::XY, Horizontal) => (Axis::X, Axis::Y, Axis::X.negative_direction()),
            (Plane::XY, Vertical) => (Axis::Y, Axis::X, Axis::X.direction()),
            (Plane::XZ, Horizontal) => (Axis::X, Axis::Z, Axis::Z.direction()),
            (Plane::XZ, Vertical) => (Axis::Z, Axis::X, Axis::X.direction()),
            (Plane::YZ, Vertical) => (Axis::Y, Axis::Z, Axis::Z.direction()),
            (Plane::YZ, Horizontal) => (Axis::Z, Axis::Y, Axis::Z.negative_direction()),
        };
        GridTraits {
            owner,
            marks,
            local_offset,
        }
    }
}

/// A value triple in the caller's data units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl DomainPoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl From<[f32; 3]> for DomainPoint {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for DomainPoint {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Where a text node's anchor sits relative to its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    #[default]
    Center,
    Right,
}

/// Description of a text node: a tick label or an axis title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub text: String,
    pub color: Color,
    pub font_name: String,
    pub font_size: f32,
    /// Smoothness of extruded glyph geometry; closer to 0 is smoother.
    pub flatness: f32,
    /// Directionless margin. Whoever places the text picks the direction.
    pub offset: f32,
    pub anchor: TextAnchor,
}

impl TextSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::WHITE,
            font_name: "AppleSDGothicNeo-UltraLight".to_string(),
            font_size: 0.5,
            flatness: 0.001,
            offset: 0.6,
            anchor: TextAnchor::Center,
        }
    }

    /// Defaults used for axis titles.
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            color: Color::LIGHT_TEXT,
            ..Self::new(text)
        }
    }

    pub fn color(mut self, c: Color) -> Self {
        self.color = c;
        self
    }

    pub fn font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn right_aligned(mut self) -> Self {
        self.anchor = TextAnchor::Right;
        self
    }
}

/// Visible geometry for a plotted point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub primitive: Primitive,
    pub color: Color,
}

impl Marker {
    pub fn sphere(radius: f32, color: Color) -> Self {
        Self {
            primitive: Primitive::Sphere { radius },
            color,
        }
    }

    pub fn cube(size: f32, color: Color) -> Self {
        Self {
            primitive: Primitive::Cuboid {
                width: size,
                height: size,
                length: size,
            },
            color,
        }
    }
}

/// Attributes of the cylinder drawn for a connection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub radius: f32,
    pub color: Color,
}

impl Default for ConnectionSpec {
    fn default() -> Self {
        Self {
            radius: 0.03,
            color: Color::ORANGE,
        }
    }
}
