//! Cluster layout: items gather around the origin without overlapping.

use super::{LayoutKind, LayoutReport, LayoutRun};
use crate::attraction;
use crate::error::Result;
use crate::forces::ForceMap;
use crate::geom::{self, Axes};
use crate::item::Item;
use crate::params::LayoutParams;

pub(super) const RECENTER_AXES: Axes = Axes::Both;

pub(super) fn attract(items: &[Item], forces: &mut ForceMap, cap: f64) {
    attraction::attract_point(items, forces, geom::point(0.0, 0.0), cap);
}

/// Starts a cluster layout over `items`. Drive it with [`LayoutRun::step`].
pub fn run_cluster_layout(items: &[Item], params: &LayoutParams) -> Result<LayoutRun> {
    LayoutRun::new(LayoutKind::Cluster, items, params.clone())
}

/// Runs a cluster layout to completion.
pub fn layout_cluster(items: &mut [Item], params: &LayoutParams) -> Result<LayoutReport> {
    run_cluster_layout(items, params)?.finish(items)
}
