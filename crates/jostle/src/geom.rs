use serde::{Deserialize, Serialize};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Box2D<f64, Unit>;

/// Distances below this are treated as zero when a direction has to be derived from them.
pub const EPSILON: f64 = 1e-9;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Rounds each coordinate to the nearest multiple of `cell`.
///
/// Ties round up, toward positive infinity: `0.5` cells go to `1` and `-0.5` cells go to `0`.
/// `cell` must be positive and finite; callers check this.
pub fn grid_snap(p: Point, cell: f64) -> Point {
    point(round_half_up(p.x / cell) * cell, round_half_up(p.y / cell) * cell)
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

pub(crate) fn is_finite_vector(v: Vector) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

pub(crate) fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub fn of_point(self, p: Point) -> f64 {
        match self {
            Axis::Horizontal => p.x,
            Axis::Vertical => p.y,
        }
    }

    pub fn of_vector(self, v: Vector) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    pub fn of_size(self, s: Size) -> f64 {
        match self {
            Axis::Horizontal => s.width,
            Axis::Vertical => s.height,
        }
    }

    /// A vector with `value` on this axis and zero on the other.
    pub fn unit_scaled(self, value: f64) -> Vector {
        match self {
            Axis::Horizontal => vector(value, 0.0),
            Axis::Vertical => vector(0.0, value),
        }
    }

    pub(crate) fn set_vector(self, v: &mut Vector, value: f64) {
        match self {
            Axis::Horizontal => v.x = value,
            Axis::Vertical => v.y = value,
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" | "x" => Ok(Self::Horizontal),
            "vertical" | "v" | "y" => Ok(Self::Vertical),
            _ => Err(()),
        }
    }
}

/// Which axes a recenter pass is allowed to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axes {
    Both,
    Only(Axis),
}

impl Axes {
    pub(crate) fn mask(self, v: Vector) -> Vector {
        match self {
            Axes::Both => v,
            Axes::Only(axis) => axis.unit_scaled(axis.of_vector(v)),
        }
    }
}
