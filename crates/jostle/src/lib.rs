#![forbid(unsafe_code)]

//! Force-based overlap removal for axis-aligned rectangles.
//!
//! `jostle` moves a caller-owned slice of [`Item`]s so that none of them overlap, optionally
//! pulling them into a cluster around the origin or onto two parallel rails, and snapping them to
//! a grid at the end. Layouts run as resumable step sequences so an animated host can redraw
//! between steps.

pub mod algo;
pub mod attraction;
pub mod convergence;
pub mod error;
pub mod forces;
pub mod geom;
pub mod item;
pub mod jitter;
pub mod params;
pub mod separation;

pub use algo::cluster::{layout_cluster, run_cluster_layout};
pub use algo::rail::{layout_rail, run_rail_layout};
pub use algo::{LayoutKind, LayoutReport, LayoutRun, Phase, PhaseReport, Step};
pub use attraction::Rail;
pub use convergence::MovementTracker;
pub use error::{Error, Result};
pub use forces::{ForceMap, apply_forces};
pub use geom::{Axis, Point, Size, Vector, grid_snap};
pub use item::{Item, snap_to_grid};
pub use jitter::{Jitter, NoJitter, SeededJitter};
pub use params::{CompactionParams, LayoutParams, ResolveParams, SettleParams};
pub use separation::{SeparationMethod, SeparationParams, separate};
