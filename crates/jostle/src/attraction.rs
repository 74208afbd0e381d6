//! Attraction fields. Each one adds to a [`ForceMap`]; none of them moves items directly.

use crate::forces::ForceMap;
use crate::geom::{Axis, EPSILON, Point};
use crate::item::{self, Item};

/// Two parallel target lines running along `main_axis`, straddling the origin.
///
/// Items on the negative side of the cross axis hug the line `-gap` with their far edge facing
/// away from the origin; items on the non-negative side hug the line `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rail {
    pub main_axis: Axis,
    pub gap: f64,
}

impl Rail {
    pub fn new(main_axis: Axis, gap: f64) -> Self {
        Self { main_axis, gap }
    }

    pub fn cross_axis(&self) -> Axis {
        self.main_axis.cross()
    }

    /// Cross-axis center coordinate the item is pulled to, chosen by the side it is on now.
    pub fn target(&self, item: &Item) -> f64 {
        let cross = self.cross_axis();
        let half = cross.of_size(item.size) / 2.0;
        if cross.of_point(item.position) < 0.0 {
            -half - self.gap
        } else {
            half
        }
    }
}

/// Moves `delta` closer to zero by at most `cap`, arriving exactly once within reach.
fn capped(delta: f64, cap: f64) -> f64 {
    if delta.abs() < cap {
        delta
    } else {
        cap * delta.signum()
    }
}

/// Pulls every item toward `target` by at most `cap` per step.
pub fn attract_point(items: &[Item], forces: &mut ForceMap, target: Point, cap: f64) {
    for (index, item) in items.iter().enumerate() {
        let v = target - item.position;
        let distance = v.length();
        if distance < EPSILON {
            continue;
        }
        if distance < cap {
            forces.add(index, v);
        } else {
            forces.add(index, v * (cap / distance));
        }
    }
}

/// Pulls every item's cross-axis coordinate toward its rail by at most `cap` per step.
///
/// An item that is already beyond its rail (further from the origin) is corrected in full, so it
/// never oscillates around the line.
pub fn attract_rail(items: &[Item], forces: &mut ForceMap, rail: &Rail, cap: f64) {
    let cross = rail.cross_axis();
    for (index, item) in items.iter().enumerate() {
        let p = cross.of_point(item.position);
        let target = rail.target(item);
        let delta = target - p;
        if delta.abs() < EPSILON {
            continue;
        }
        let beyond = if p < 0.0 { p < target } else { p > target };
        let step = if beyond { delta } else { capped(delta, cap) };
        forces.add(index, cross.unit_scaled(step));
    }
}

/// Pulls every item's `axis` coordinate toward zero by at most `cap` per step.
pub fn attract_along(items: &[Item], forces: &mut ForceMap, axis: Axis, cap: f64) {
    for (index, item) in items.iter().enumerate() {
        let delta = -axis.of_point(item.position);
        if delta.abs() < EPSILON {
            continue;
        }
        forces.add(index, axis.unit_scaled(capped(delta, cap)));
    }
}

/// Pulls every item a `strength` fraction of the way toward its grid-snapped position.
///
/// A soft bias, not a snap. No-op when `grid_size` is not positive.
pub fn attract_grid(items: &[Item], forces: &mut ForceMap, grid_size: f64, strength: f64) {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return;
    }
    for (index, it) in items.iter().enumerate() {
        let v = item::snapped_position(it, grid_size) - it.position;
        if v.length() < EPSILON {
            continue;
        }
        forces.add(index, v * strength);
    }
}

/// Overwrites the cross-axis force of any item a pending push would carry across its rail toward
/// the origin, replacing it with the exact correction onto the rail.
pub fn reproject_rail(items: &[Item], forces: &mut ForceMap, rail: &Rail) {
    let cross = rail.cross_axis();
    for (index, item) in items.iter().enumerate() {
        let p = cross.of_point(item.position);
        let target = rail.target(item);
        let pending = forces.get(index).map_or(0.0, |v| cross.of_vector(v));
        let predicted = p + pending;
        let (inward, crosses) = if p < 0.0 {
            (pending > 0.0, predicted > target)
        } else {
            (pending < 0.0, predicted < target)
        };
        if inward && crosses {
            forces.set_component(index, cross, target - p);
        }
    }
}

/// Pins every item's cross-axis coordinate to its rail, whatever the pending force says.
pub fn lock_rail(items: &[Item], forces: &mut ForceMap, rail: &Rail) {
    let cross = rail.cross_axis();
    for (index, item) in items.iter().enumerate() {
        let delta = rail.target(item) - cross.of_point(item.position);
        forces.set_component(index, cross, delta);
    }
}
