//! Rail layout: items line up on two parallel rails on either side of the main axis, then slide
//! together along them.

use super::{LayoutKind, LayoutReport, LayoutRun};
use crate::attraction::{self, Rail};
use crate::error::Result;
use crate::forces::ForceMap;
use crate::geom::{Axes, Axis};
use crate::item::Item;
use crate::params::LayoutParams;

/// Settle steps recenter across the rails only; drift along them is left to compaction.
pub(super) fn settle_recenter_axes(main_axis: Axis) -> Axes {
    Axes::Only(main_axis.cross())
}

/// The final recenter runs along the rails; the cross axis is pinned by the rails themselves.
pub(super) fn finalize_recenter_axes(main_axis: Axis) -> Axes {
    Axes::Only(main_axis)
}

pub(super) fn attract(items: &[Item], forces: &mut ForceMap, rail: &Rail, cap: f64) {
    attraction::attract_rail(items, forces, rail, cap);
}

/// Mild gravity toward the origin along the rails, with every item locked onto its rail.
pub(super) fn compact(items: &mut [Item], rail: &Rail, gravity: f64) -> bool {
    let mut forces = ForceMap::new(items.len());
    attraction::attract_along(items, &mut forces, rail.main_axis, gravity);
    attraction::lock_rail(items, &mut forces, rail);
    forces.apply(items)
}

/// Starts a rail layout whose rails run along `main_axis`.
pub fn run_rail_layout(items: &[Item], params: &LayoutParams, main_axis: Axis) -> Result<LayoutRun> {
    LayoutRun::new(LayoutKind::Rail(main_axis), items, params.clone())
}

/// Runs a rail layout to completion.
pub fn layout_rail(
    items: &mut [Item],
    params: &LayoutParams,
    main_axis: Axis,
) -> Result<LayoutReport> {
    run_rail_layout(items, params, main_axis)?.finish(items)
}
