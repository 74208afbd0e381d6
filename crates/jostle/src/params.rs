use crate::error::{Error, Result};
use crate::separation::SeparationMethod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Minimum gap between item boxes.
    pub separation_margin: f64,
    /// Grid cell size. Values `<= 0` disable grid attraction and the final snap.
    pub grid_size: f64,
    /// Seed for the tie-break directions of exactly coincident items.
    pub random_seed: u64,
    pub settle: SettleParams,
    pub compaction: CompactionParams,
    pub resolve: ResolveParams,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            separation_margin: 1.0,
            grid_size: 1.0,
            random_seed: 0,
            settle: SettleParams::default(),
            compaction: CompactionParams::default(),
            resolve: ResolveParams::default(),
        }
    }
}

/// Attraction-dominated relaxation with a decaying pull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleParams {
    pub max_steps: usize,
    /// Attraction cap while `alpha == 1`.
    pub max_strength: f64,
    /// Lower bound for the attraction cap once `alpha` has decayed.
    pub min_strength: f64,
    /// Per-step multiplier applied to `alpha`.
    pub alpha_decay: f64,
    /// The phase cannot end before `alpha` drops below this.
    pub alpha_floor: f64,
    pub movement_threshold: f64,
    pub substeps: usize,
    pub method: SeparationMethod,
    pub separation_strength: f64,
}

impl Default for SettleParams {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_strength: 0.5,
            min_strength: 0.01,
            alpha_decay: 0.97,
            alpha_floor: 0.05,
            movement_threshold: 1.0,
            substeps: 3,
            method: SeparationMethod::Radial,
            separation_strength: 1.0,
        }
    }
}

/// Rail-only phase sliding items together along the rails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionParams {
    pub max_steps: usize,
    /// Per-step cap of the pull toward the origin along the rails.
    pub gravity: f64,
    pub substeps: usize,
    pub movement_threshold: f64,
}

impl Default for CompactionParams {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            gravity: 0.1,
            substeps: 2,
            movement_threshold: 0.1,
        }
    }
}

/// Strict axis separation clearing what the settle phase left overlapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveParams {
    pub max_steps: usize,
    /// Fraction of the way toward the grid slot travelled per step.
    pub grid_strength: f64,
    pub rounds: usize,
    pub movement_threshold: f64,
    pub separation_strength: f64,
}

impl Default for ResolveParams {
    fn default() -> Self {
        Self {
            max_steps: 100,
            grid_strength: 0.05,
            rounds: 4,
            movement_threshold: 0.1,
            separation_strength: 1.0,
        }
    }
}

fn check(name: &'static str, value: f64, ok: bool) -> Result<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

impl LayoutParams {
    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_separation_margin(mut self, margin: f64) -> Self {
        self.separation_margin = margin;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid_size > 0.0
    }

    pub fn validate(&self) -> Result<()> {
        let m = self.separation_margin;
        check("separation_margin", m, m >= 0.0)?;
        check("grid_size", self.grid_size, true)?;

        let s = &self.settle;
        check("settle.max_strength", s.max_strength, s.max_strength > 0.0)?;
        check("settle.min_strength", s.min_strength, s.min_strength > 0.0)?;
        check(
            "settle.alpha_decay",
            s.alpha_decay,
            s.alpha_decay > 0.0 && s.alpha_decay <= 1.0,
        )?;
        check("settle.alpha_floor", s.alpha_floor, s.alpha_floor >= 0.0)?;
        check(
            "settle.movement_threshold",
            s.movement_threshold,
            s.movement_threshold >= 0.0,
        )?;
        check(
            "settle.separation_strength",
            s.separation_strength,
            s.separation_strength > 0.0,
        )?;

        let c = &self.compaction;
        check("compaction.gravity", c.gravity, c.gravity > 0.0)?;
        check(
            "compaction.movement_threshold",
            c.movement_threshold,
            c.movement_threshold >= 0.0,
        )?;

        let r = &self.resolve;
        check(
            "resolve.grid_strength",
            r.grid_strength,
            (0.0..=1.0).contains(&r.grid_strength),
        )?;
        check(
            "resolve.movement_threshold",
            r.movement_threshold,
            r.movement_threshold >= 0.0,
        )?;
        check(
            "resolve.separation_strength",
            r.separation_strength,
            r.separation_strength > 0.0,
        )?;
        Ok(())
    }
}
