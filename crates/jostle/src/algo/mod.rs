//! Phase orchestrators.
//!
//! A [`LayoutRun`] is a resumable state machine: each call to [`LayoutRun::step`] performs one
//! relaxation step against the caller's items and returns. An animated host calls it once per
//! frame and redraws in between; a batch caller uses [`LayoutRun::finish`]. Dropping the run at
//! any point leaves the items valid, just not fully settled.

pub mod cluster;
pub mod rail;

use crate::attraction;
use crate::convergence::MovementTracker;
use crate::error::{Error, Result};
use crate::forces::ForceMap;
use crate::geom::{Axes, Axis};
use crate::item::{self, Item};
use crate::jitter::SeededJitter;
use crate::params::LayoutParams;
use crate::separation::{self, SeparationMethod, SeparationParams};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Settle,
    /// Rail layouts only.
    Compaction,
    Resolve,
    Finalize,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Cluster,
    /// Rails run along the given axis.
    Rail(Axis),
}

impl LayoutKind {
    fn settle_recenter_axes(self) -> Axes {
        match self {
            LayoutKind::Cluster => cluster::RECENTER_AXES,
            LayoutKind::Rail(main_axis) => rail::settle_recenter_axes(main_axis),
        }
    }

    fn finalize_recenter_axes(self) -> Axes {
        match self {
            LayoutKind::Cluster => cluster::RECENTER_AXES,
            LayoutKind::Rail(main_axis) => rail::finalize_recenter_axes(main_axis),
        }
    }
}

/// Outcome of one call to [`LayoutRun::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    /// Phase the step belonged to.
    pub phase: Phase,
    pub positions_changed: bool,
    /// No further steps will change anything.
    pub done: bool,
    /// Total displacement measured over the step (excluding recentering).
    pub movement: f64,
}

impl Step {
    /// Whether the host should request another frame.
    pub fn keep_going(&self) -> bool {
        !self.done
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub steps: usize,
    /// `false` when the phase stopped at its step cap.
    pub converged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutReport {
    pub settle: PhaseReport,
    pub compaction: Option<PhaseReport>,
    pub resolve: PhaseReport,
    pub total_steps: usize,
}

#[derive(Debug, Clone)]
pub struct LayoutRun {
    kind: LayoutKind,
    params: LayoutParams,
    item_count: usize,
    jitter: SeededJitter,
    phase: Phase,
    phase_steps: usize,
    alpha: f64,
    report: LayoutReport,
}

impl LayoutRun {
    pub fn new(kind: LayoutKind, items: &[Item], params: LayoutParams) -> Result<Self> {
        params.validate()?;
        item::validate_items(items)?;
        let report = LayoutReport {
            compaction: matches!(kind, LayoutKind::Rail(_)).then(PhaseReport::default),
            ..Default::default()
        };
        Ok(Self {
            kind,
            jitter: SeededJitter::new(params.random_seed),
            params,
            item_count: items.len(),
            phase: Phase::Settle,
            phase_steps: 0,
            alpha: 1.0,
            report,
        })
    }

    pub fn kind(&self) -> LayoutKind {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Current attraction temperature of the settle phase.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn report(&self) -> &LayoutReport {
        &self.report
    }

    /// Performs exactly one step. Calling it after completion is a no-op reporting `done`.
    pub fn step(&mut self, items: &mut [Item]) -> Result<Step> {
        if items.len() != self.item_count {
            return Err(Error::ItemCountChanged {
                expected: self.item_count,
                actual: items.len(),
            });
        }

        let phase = self.phase;
        let (positions_changed, movement) = match phase {
            Phase::Done => (false, 0.0),
            Phase::Finalize => {
                let changed = self.finalize(items);
                self.phase = Phase::Done;
                tracing::debug!(
                    kind = ?self.kind,
                    total_steps = self.report.total_steps + 1,
                    "layout finished"
                );
                (changed, 0.0)
            }
            Phase::Settle => self.settle_step(items),
            Phase::Compaction => self.compaction_step(items),
            Phase::Resolve => self.resolve_step(items),
        };
        if !matches!(phase, Phase::Done) {
            self.report.total_steps += 1;
        }
        tracing::trace!(?phase, movement, positions_changed, "layout step");

        Ok(Step {
            phase,
            positions_changed,
            done: self.phase == Phase::Done,
            movement,
        })
    }

    /// Drives the run to completion.
    pub fn finish(&mut self, items: &mut [Item]) -> Result<LayoutReport> {
        while self.step(items)?.keep_going() {}
        Ok(self.report.clone())
    }

    fn settle_step(&mut self, items: &mut [Item]) -> (bool, f64) {
        let recentered = item::recenter(items, self.kind.settle_recenter_axes());
        let tracker = MovementTracker::begin(items);
        let settle = self.params.settle.clone();

        let cap = settle.min_strength.max(settle.max_strength * self.alpha);
        let mut forces = ForceMap::new(items.len());
        match self.kind {
            LayoutKind::Cluster => cluster::attract(items, &mut forces, cap),
            LayoutKind::Rail(main_axis) => {
                rail::attract(items, &mut forces, &self.rail(main_axis), cap)
            }
        }
        let mut moved = forces.apply(items);

        let sep = SeparationParams {
            margin: self.params.separation_margin,
            strength: settle.separation_strength,
            method: settle.method,
            restrict_to: None,
        };
        for _ in 0..settle.substeps {
            moved |= self.separation_pass(items, &sep);
        }

        self.alpha *= settle.alpha_decay;
        let movement = tracker.measure(items);
        self.phase_steps += 1;

        let cooled = self.alpha < settle.alpha_floor || items.len() < 2;
        let converged = movement < settle.movement_threshold && cooled;
        if converged || self.phase_steps >= settle.max_steps {
            let next = match self.kind {
                LayoutKind::Cluster => Phase::Resolve,
                LayoutKind::Rail(_) => Phase::Compaction,
            };
            self.report.settle = self.end_phase(next, converged, movement);
        }
        (recentered || moved, movement)
    }

    fn compaction_step(&mut self, items: &mut [Item]) -> (bool, f64) {
        let LayoutKind::Rail(main_axis) = self.kind else {
            self.phase = Phase::Resolve;
            return (false, 0.0);
        };
        let rail = self.rail(main_axis);
        let compaction = self.params.compaction.clone();
        let tracker = MovementTracker::begin(items);

        let mut moved = rail::compact(items, &rail, compaction.gravity);
        let sep = SeparationParams {
            margin: self.params.separation_margin,
            strength: 1.0,
            method: SeparationMethod::Axis,
            restrict_to: Some(main_axis),
        };
        for _ in 0..compaction.substeps {
            let mut forces = separation::separate(items, &sep, &mut self.jitter);
            attraction::lock_rail(items, &mut forces, &rail);
            moved |= forces.apply(items);
        }

        let movement = tracker.measure(items);
        self.phase_steps += 1;
        let converged = movement < compaction.movement_threshold;
        if converged || self.phase_steps >= compaction.max_steps {
            let report = self.end_phase(Phase::Resolve, converged, movement);
            self.report.compaction = Some(report);
        }
        (moved, movement)
    }

    fn resolve_step(&mut self, items: &mut [Item]) -> (bool, f64) {
        let resolve = self.params.resolve.clone();
        let tracker = MovementTracker::begin(items);

        let mut forces = ForceMap::new(items.len());
        attraction::attract_grid(
            items,
            &mut forces,
            self.params.grid_size,
            resolve.grid_strength,
        );
        let mut moved = forces.apply(items);

        let sep = SeparationParams {
            margin: self.params.separation_margin,
            strength: resolve.separation_strength,
            method: SeparationMethod::Axis,
            restrict_to: None,
        };
        for _ in 0..resolve.rounds {
            moved |= self.separation_pass(items, &sep);
        }

        let movement = tracker.measure(items);
        self.phase_steps += 1;
        let converged = movement < resolve.movement_threshold;
        if converged || self.phase_steps >= resolve.max_steps {
            self.report.resolve = self.end_phase(Phase::Finalize, converged, movement);
        }
        (moved, movement)
    }

    /// One committed separation sub-pass; rail layouts re-project onto their rails before commit.
    fn separation_pass(&mut self, items: &mut [Item], sep: &SeparationParams) -> bool {
        let mut forces = separation::separate(items, sep, &mut self.jitter);
        if let LayoutKind::Rail(main_axis) = self.kind {
            attraction::reproject_rail(items, &mut forces, &self.rail(main_axis));
        }
        forces.apply(items)
    }

    fn finalize(&mut self, items: &mut [Item]) -> bool {
        let mut changed = item::recenter(items, self.kind.finalize_recenter_axes());
        if self.params.grid_enabled() {
            let before = MovementTracker::begin(items);
            // Grid size was validated as finite and is positive here.
            if item::snap_to_grid(items, self.params.grid_size).is_ok() {
                changed |= before.measure(items) > 0.0;
            }
        }
        changed
    }

    fn end_phase(&mut self, next: Phase, converged: bool, movement: f64) -> PhaseReport {
        let report = PhaseReport {
            steps: self.phase_steps,
            converged,
        };
        tracing::debug!(
            kind = ?self.kind,
            phase = ?self.phase,
            steps = report.steps,
            converged,
            movement,
            "layout phase finished"
        );
        self.phase = next;
        self.phase_steps = 0;
        report
    }

    fn rail(&self, main_axis: Axis) -> attraction::Rail {
        attraction::Rail::new(main_axis, self.params.separation_margin)
    }
}
