//! Pairwise overlap separation.
//!
//! Every pair whose margin-expanded boxes overlap contributes one push to each of its two items.
//! Pushes are computed per ordered pair, so the two halves of a pair are not exact negatives: each
//! is scaled by the pushed item's own mass factor.

use crate::forces::ForceMap;
use crate::geom::{self, Axis, EPSILON, Vector};
use crate::item::Item;
use crate::jitter::Jitter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparationMethod {
    /// Push along the axis of least overlap.
    #[default]
    Axis,
    /// Push along the center-to-center ray by the distance deficit.
    Radial,
}

impl std::str::FromStr for SeparationMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "axis" => Ok(Self::Axis),
            "radial" => Ok(Self::Radial),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationParams {
    /// Minimum gap between two boxes; also inflates them for the overlap test.
    pub margin: f64,
    /// Multiplier applied to every push.
    pub strength: f64,
    pub method: SeparationMethod,
    /// Confines axis-method pushes to one axis. Ignored by the radial method.
    pub restrict_to: Option<Axis>,
}

impl Default for SeparationParams {
    fn default() -> Self {
        Self {
            margin: 0.0,
            strength: 1.0,
            method: SeparationMethod::Axis,
            restrict_to: None,
        }
    }
}

impl SeparationParams {
    pub fn axis(margin: f64) -> Self {
        Self {
            margin,
            ..Default::default()
        }
    }

    pub fn radial(margin: f64) -> Self {
        Self {
            margin,
            method: SeparationMethod::Radial,
            ..Default::default()
        }
    }
}

/// Share of a pair's separation that `a` has to travel: `1 - area(a) / (area(a) + area(b))`.
///
/// The larger item moves less. Degenerate areas split the push evenly.
pub fn mass_factor(a: &Item, b: &Item) -> f64 {
    let area_a = a.area();
    let total = area_a + b.area();
    if !(total.is_finite() && total > EPSILON) {
        return 0.5;
    }
    1.0 - area_a / total
}

/// Computes separation pushes for every overlapping pair. Positions are not touched.
pub fn separate<J: Jitter + ?Sized>(
    items: &[Item],
    params: &SeparationParams,
    jitter: &mut J,
) -> ForceMap {
    let mut forces = ForceMap::new(items.len());
    if items.len() < 2 {
        return forces;
    }

    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let (a, b) = (&items[i], &items[j]);
            if !a.overlaps_with_margin(b, params.margin) {
                continue;
            }
            let (push_a, push_b) = match params.method {
                // `a` always precedes `b` in the sequence.
                SeparationMethod::Axis => (
                    axis_push(a, b, true, params),
                    axis_push(b, a, false, params),
                ),
                SeparationMethod::Radial => radial_push(a, b, params.margin, jitter),
            };
            forces.add(i, push_a * (mass_factor(a, b) * params.strength));
            forces.add(j, push_b * (mass_factor(b, a) * params.strength));
        }
    }

    forces
}

/// Unscaled push on `a` away from `b` along the axis of least overlap.
///
/// `a_first` breaks ties between equal centers: the earlier item in the sequence goes negative.
fn axis_push(a: &Item, b: &Item, a_first: bool, params: &SeparationParams) -> Vector {
    let ra = a.rect();
    let rb = b.rect();
    let overlap_x = ra.max.x.min(rb.max.x) - ra.min.x.max(rb.min.x) + params.margin;
    let overlap_y = ra.max.y.min(rb.max.y) - ra.min.y.max(rb.min.y) + params.margin;

    let axis = params.restrict_to.unwrap_or(if overlap_x <= overlap_y {
        Axis::Horizontal
    } else {
        Axis::Vertical
    });
    let amount = match axis {
        Axis::Horizontal => overlap_x,
        Axis::Vertical => overlap_y,
    };

    let ca = axis.of_point(a.position);
    let cb = axis.of_point(b.position);
    let sign = if ca < cb || (ca == cb && a_first) {
        -1.0
    } else {
        1.0
    };
    axis.unit_scaled(sign * amount)
}

/// Unscaled pushes on `a` and `b` along the ray between their centers.
fn radial_push<J: Jitter + ?Sized>(
    a: &Item,
    b: &Item,
    margin: f64,
    jitter: &mut J,
) -> (Vector, Vector) {
    let offset = a.position - b.position;
    let distance = offset.length();
    // Unit vector pointing from b toward a.
    let dir = if distance < EPSILON {
        -jitter.direction()
    } else {
        offset / distance
    };
    if !geom::is_finite_vector(dir) {
        return (Vector::zero(), Vector::zero());
    }

    let required = half_extent_along(a, dir) + half_extent_along(b, dir) + margin;
    let deficit = required - distance;
    if !(deficit.is_finite() && deficit > 0.0) {
        return (Vector::zero(), Vector::zero());
    }
    (dir * deficit, -dir * deficit)
}

/// Distance from the center to the box edge along the unit direction `dir`.
fn half_extent_along(item: &Item, dir: Vector) -> f64 {
    let half = item.half_size();
    let along_x = if dir.x.abs() < EPSILON {
        f64::INFINITY
    } else {
        half.x / dir.x.abs()
    };
    let along_y = if dir.y.abs() < EPSILON {
        f64::INFINITY
    } else {
        half.y / dir.y.abs()
    };
    along_x.min(along_y)
}

/// Index pairs whose margin-expanded boxes overlap by more than `tolerance` on both axes.
pub fn overlapping_pairs(items: &[Item], margin: f64, tolerance: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..items.len() {
        for j in (i + 1)..items.len() {
            let ra = items[i].rect();
            let rb = items[j].rect();
            let overlap_x = ra.max.x.min(rb.max.x) - ra.min.x.max(rb.min.x) + margin;
            let overlap_y = ra.max.y.min(rb.max.y) - ra.min.y.max(rb.min.y) + margin;
            if overlap_x > tolerance && overlap_y > tolerance {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
