use crate::geom::Point;
use crate::item::Item;

/// Snapshot of item positions taken at the start of a step.
#[derive(Debug, Clone, Default)]
pub struct MovementTracker {
    snapshot: Vec<Point>,
}

impl MovementTracker {
    pub fn begin(items: &[Item]) -> Self {
        Self {
            snapshot: items.iter().map(|it| it.position).collect(),
        }
    }

    /// Sum of Euclidean displacements since [`MovementTracker::begin`].
    ///
    /// Items beyond the snapshot length are not tracked.
    pub fn measure(&self, items: &[Item]) -> f64 {
        self.snapshot
            .iter()
            .zip(items)
            .map(|(before, it)| (it.position - *before).length())
            .sum()
    }
}
